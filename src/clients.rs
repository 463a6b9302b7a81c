//! HTTP clients for the backend's resource endpoints.
//!
//! [`RawClient`] exposes the full endpoint surface and hands back plain
//! exchanges; it never judges the response. [`Client`] layers the common
//! happy-path checks on top so scenario setup stays short. Both own one
//! session, so cookie state is shared across the calls of one logical
//! scenario and nothing else.

use crate::endpoints::Endpoints;
use crate::registry::Failure;
use crate::requests::{
    AuthenticateUserRequest, CreateAuctionRequest, CreateBidRequest, CreateQuestionRequest,
    CreateReplyRequest, CreateUserRequest, UpdateAuctionRequest, UpdateUserRequest,
};
use crate::responses::{AuctionView, BidView, CreateUserResponse, QuestionView};
use crate::transport::{Exchange, Session, TransportError};
use crate::validator::{parse_json, validate};
use crate::AUTH_COOKIE;

/// Thin endpoint-by-endpoint wrapper over one session.
pub struct RawClient {
    session: Session,
    endpoints: Endpoints,
}

impl RawClient {
    pub fn new(endpoints: &Endpoints) -> Result<Self, TransportError> {
        Ok(Self { session: Session::new()?, endpoints: endpoints.clone() })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // Media API

    pub fn upload_media(&self, content: &[u8]) -> Result<Exchange, TransportError> {
        self.session.post_bytes(&self.endpoints.media, content)
    }

    pub fn download_media(&self, media_id: &str) -> Result<Exchange, TransportError> {
        self.session.get(&format!("{}/{}", self.endpoints.media, media_id))
    }

    // User API

    pub fn create_user(&self, params: &CreateUserRequest) -> Result<Exchange, TransportError> {
        self.session.post_json(&self.endpoints.user, params)
    }

    pub fn get_user(&self, user_id: &str) -> Result<Exchange, TransportError> {
        self.session.get(&format!("{}/{}", self.endpoints.user, user_id))
    }

    pub fn authenticate_user(
        &self,
        params: &AuthenticateUserRequest,
    ) -> Result<Exchange, TransportError> {
        self.session.post_json(&self.endpoints.user_auth, params)
    }

    pub fn update_user(&self, params: &UpdateUserRequest) -> Result<Exchange, TransportError> {
        self.session.patch_json(&self.endpoints.user, params)
    }

    pub fn delete_user(&self, user_id: &str) -> Result<Exchange, TransportError> {
        self.session.delete(&format!("{}/{}", self.endpoints.user, user_id))
    }

    pub fn list_user_auctions(&self, user_id: &str) -> Result<Exchange, TransportError> {
        self.session.get(&format!("{}/{}/auctions", self.endpoints.user, user_id))
    }

    pub fn list_user_followed_auctions(&self, user_id: &str) -> Result<Exchange, TransportError> {
        self.session.get(&format!("{}/{}/following", self.endpoints.user, user_id))
    }

    // Auction API

    pub fn create_auction(&self, params: &CreateAuctionRequest) -> Result<Exchange, TransportError> {
        self.session.post_json(&self.endpoints.auction, params)
    }

    pub fn get_auction(&self, auction_id: &str) -> Result<Exchange, TransportError> {
        self.session.get(&format!("{}/{}", self.endpoints.auction, auction_id))
    }

    pub fn update_auction(
        &self,
        auction_id: &str,
        params: &UpdateAuctionRequest,
    ) -> Result<Exchange, TransportError> {
        self.session
            .patch_json(&format!("{}/{}", self.endpoints.auction, auction_id), params)
    }

    pub fn create_bid(&self, params: &CreateBidRequest) -> Result<Exchange, TransportError> {
        let auction_id = params.auction_id.as_deref().unwrap_or("");
        self.session
            .post_json(&format!("{}/{}/bid", self.endpoints.auction, auction_id), params)
    }

    pub fn list_bids(&self, auction_id: &str) -> Result<Exchange, TransportError> {
        self.session.get(&format!("{}/{}/bid", self.endpoints.auction, auction_id))
    }

    // Question API

    pub fn create_question(
        &self,
        auction_id: &str,
        params: &CreateQuestionRequest,
    ) -> Result<Exchange, TransportError> {
        self.session
            .post_json(&format!("{}/{}/question", self.endpoints.auction, auction_id), params)
    }

    pub fn create_reply(
        &self,
        auction_id: &str,
        question_id: &str,
        params: &CreateReplyRequest,
    ) -> Result<Exchange, TransportError> {
        self.session.post_json(
            &format!("{}/{}/question/{}/reply", self.endpoints.auction, auction_id, question_id),
            params,
        )
    }

    pub fn list_questions(&self, auction_id: &str) -> Result<Exchange, TransportError> {
        self.session.get(&format!("{}/{}/question", self.endpoints.auction, auction_id))
    }

    // Discovery API

    pub fn list_recent_auctions(&self) -> Result<Exchange, TransportError> {
        self.session.get(&format!("{}/any/recent", self.endpoints.auction))
    }

    pub fn list_popular_auctions(&self) -> Result<Exchange, TransportError> {
        self.session.get(&format!("{}/any/popular", self.endpoints.auction))
    }

    pub fn list_auctions_about_to_close(&self) -> Result<Exchange, TransportError> {
        self.session.get(&format!("{}/any/soon-to-close", self.endpoints.auction))
    }
}

/// Checked convenience layer for scenario setup: every helper asserts the
/// happy-path status before handing back decoded data.
pub struct Client {
    raw: RawClient,
}

impl Client {
    pub fn new(endpoints: &Endpoints) -> Result<Self, Failure> {
        Ok(Self { raw: RawClient::new(endpoints)? })
    }

    pub fn raw(&self) -> &RawClient {
        &self.raw
    }

    // Media API

    pub fn upload_media(&self, content: &[u8]) -> Result<String, Failure> {
        let exchange = self.raw.upload_media(content)?;
        validate(&exchange).status_code(200)?;
        Ok(exchange.response.text().into_owned())
    }

    pub fn download_media(&self, media_id: &str) -> Result<Vec<u8>, Failure> {
        let exchange = self.raw.download_media(media_id)?;
        validate(&exchange).status_code(200)?;
        Ok(exchange.response.body.clone())
    }

    // User API

    pub fn create_user(&self, params: &CreateUserRequest) -> Result<CreateUserResponse, Failure> {
        let exchange = self.raw.create_user(params)?;
        validate(&exchange).status_code(200)?;
        parse_json(&exchange)
    }

    pub fn authenticate_user(&self, params: &AuthenticateUserRequest) -> Result<(), Failure> {
        let exchange = self.raw.authenticate_user(params)?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        validator.cookie_exists(AUTH_COOKIE)?;
        Ok(())
    }

    /// Creates a random user and logs the session in as that user.
    pub fn create_user_and_auth(&self) -> Result<CreateUserResponse, Failure> {
        let request = CreateUserRequest::random();
        let user = self.create_user(&request)?;
        let auth = AuthenticateUserRequest::new(
            request.id.as_deref().unwrap_or(""),
            request.pwd.as_deref().unwrap_or(""),
        );
        self.authenticate_user(&auth)?;
        Ok(user)
    }

    pub fn delete_user(&self, user_id: &str) -> Result<(), Failure> {
        let exchange = self.raw.delete_user(user_id)?;
        validate(&exchange).status_code(204)?;
        Ok(())
    }

    pub fn update_user(&self, params: &UpdateUserRequest) -> Result<(), Failure> {
        let exchange = self.raw.update_user(params)?;
        validate(&exchange).status_code(204)?;
        Ok(())
    }

    pub fn list_auctions_of_user(&self, user_id: &str) -> Result<Vec<AuctionView>, Failure> {
        let exchange = self.raw.list_user_auctions(user_id)?;
        validate(&exchange).status_code(200)?;
        parse_json(&exchange)
    }

    // Auction API

    pub fn create_auction(&self, params: &CreateAuctionRequest) -> Result<AuctionView, Failure> {
        let exchange = self.raw.create_auction(params)?;
        validate(&exchange).status_code(200)?;
        parse_json(&exchange)
    }

    /// Authenticated owner plus one fresh auction of theirs.
    pub fn create_user_and_auction(&self) -> Result<(CreateUserResponse, AuctionView), Failure> {
        let user = self.create_user_and_auth()?;
        let auction = self.create_auction(&CreateAuctionRequest::random(&user.id))?;
        Ok((user, auction))
    }

    pub fn get_auction(&self, auction_id: &str) -> Result<AuctionView, Failure> {
        let exchange = self.raw.get_auction(auction_id)?;
        validate(&exchange).status_code(200)?;
        parse_json(&exchange)
    }

    pub fn update_auction(
        &self,
        auction_id: &str,
        params: &UpdateAuctionRequest,
    ) -> Result<(), Failure> {
        let exchange = self.raw.update_auction(auction_id, params)?;
        validate(&exchange).status_code(204)?;
        Ok(())
    }

    pub fn create_bid(&self, params: &CreateBidRequest) -> Result<BidView, Failure> {
        let exchange = self.raw.create_bid(params)?;
        validate(&exchange).status_code(200)?;
        parse_json(&exchange)
    }

    // Question API

    pub fn create_question(
        &self,
        auction_id: &str,
        params: &CreateQuestionRequest,
    ) -> Result<QuestionView, Failure> {
        let exchange = self.raw.create_question(auction_id, params)?;
        validate(&exchange).status_code(200)?;
        parse_json(&exchange)
    }

    pub fn create_random_question(
        &self,
        user_id: &str,
        auction_id: &str,
    ) -> Result<QuestionView, Failure> {
        self.create_question(auction_id, &CreateQuestionRequest::random(user_id, auction_id))
    }

    pub fn create_reply(
        &self,
        auction_id: &str,
        question_id: &str,
        params: &CreateReplyRequest,
    ) -> Result<String, Failure> {
        let exchange = self.raw.create_reply(auction_id, question_id, params)?;
        validate(&exchange).status_code(200)?;
        Ok(exchange.response.text().into_owned())
    }
}
