//! Explicit schema types for every request shape the backend accepts.
//!
//! Each shape knows how to generate a fully valid random instance, how to
//! judge its own validity, and which single-field corruptions apply to it.
//! Fields that a corruption can null out are `Option`s; `None` serializes as
//! JSON `null`, which is how the wire probes a missing required field.

use serde::Serialize;

use crate::fake;
use crate::invalidator::{invalid_requests, InvalidRequest, Invalidator};

fn required_string(field: &Option<String>) -> bool {
    field.as_deref().map_or(false, |s| !s.is_empty())
}

fn required_positive(field: &Option<f64>) -> bool {
    field.map_or(false, |v| v > 0.0)
}

// ============================================================================
// USER
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub pwd: Option<String>,
    pub photo_id: Option<String>,
}

impl CreateUserRequest {
    pub fn random() -> Self {
        Self {
            id: Some(fake::username()),
            name: Some(fake::full_name()),
            pwd: Some(fake::password()),
            photo_id: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        required_string(&self.id) && required_string(&self.name) && required_string(&self.pwd)
    }

    pub fn invalidators() -> Vec<Invalidator<Self>> {
        vec![
            Invalidator::null("id", |r| Self { id: None, ..r }),
            Invalidator::empty("id", |r| Self { id: Some(String::new()), ..r }),
            Invalidator::null("name", |r| Self { name: None, ..r }),
            Invalidator::empty("name", |r| Self { name: Some(String::new()), ..r }),
            Invalidator::null("pwd", |r| Self { pwd: None, ..r }),
            Invalidator::empty("pwd", |r| Self { pwd: Some(String::new()), ..r }),
        ]
    }

    pub fn invalid_requests() -> Vec<InvalidRequest<Self>> {
        invalid_requests(Self::invalidators(), Self::random)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateUserRequest {
    pub user: Option<String>,
    pub pwd: Option<String>,
}

impl AuthenticateUserRequest {
    pub fn new(user: &str, pwd: &str) -> Self {
        Self { user: Some(user.to_string()), pwd: Some(pwd.to_string()) }
    }

    pub fn random() -> Self {
        Self::new(&fake::username(), &fake::password())
    }

    pub fn is_valid(&self) -> bool {
        required_string(&self.user) && required_string(&self.pwd)
    }

    pub fn invalidators() -> Vec<Invalidator<Self>> {
        vec![
            Invalidator::null("user", |r| Self { user: None, ..r }),
            Invalidator::empty("user", |r| Self { user: Some(String::new()), ..r }),
            Invalidator::null("pwd", |r| Self { pwd: None, ..r }),
            Invalidator::empty("pwd", |r| Self { pwd: Some(String::new()), ..r }),
        ]
    }

    pub fn invalid_requests() -> Vec<InvalidRequest<Self>> {
        invalid_requests(Self::invalidators(), Self::random)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub pwd: Option<String>,
    pub photo_id: Option<String>,
}

impl UpdateUserRequest {
    pub fn random() -> Self {
        Self {
            name: Some(fake::full_name()),
            pwd: Some(fake::password()),
            photo_id: None,
        }
    }
}

// ============================================================================
// AUCTION
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuctionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub minimum_price: Option<f64>,
    pub end_time: Option<String>,
    pub image_id: Option<String>,
}

impl CreateAuctionRequest {
    pub fn random(owner: &str) -> Self {
        Self {
            title: Some(fake::sentence()),
            description: Some(fake::paragraph()),
            owner: Some(owner.to_string()),
            minimum_price: Some(fake::price()),
            end_time: Some(fake::future_timestamp()),
            image_id: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        required_string(&self.title)
            && required_string(&self.description)
            && required_string(&self.owner)
            && required_positive(&self.minimum_price)
            && required_string(&self.end_time)
    }

    pub fn invalidators() -> Vec<Invalidator<Self>> {
        vec![
            Invalidator::null("title", |r| Self { title: None, ..r }),
            Invalidator::empty("title", |r| Self { title: Some(String::new()), ..r }),
            Invalidator::null("description", |r| Self { description: None, ..r }),
            Invalidator::empty("description", |r| Self { description: Some(String::new()), ..r }),
            Invalidator::null("owner", |r| Self { owner: None, ..r }),
            Invalidator::empty("owner", |r| Self { owner: Some(String::new()), ..r }),
            Invalidator::null("minimumPrice", |r| Self { minimum_price: None, ..r }),
            Invalidator::negative("minimumPrice", |r| Self { minimum_price: Some(-1.0), ..r }),
            Invalidator::zero("minimumPrice", |r| Self { minimum_price: Some(0.0), ..r }),
            Invalidator::null("endTime", |r| Self { end_time: None, ..r }),
            Invalidator::empty("endTime", |r| Self { end_time: Some(String::new()), ..r }),
        ]
    }

    pub fn invalid_requests(owner: &str) -> Vec<InvalidRequest<Self>> {
        let owner = owner.to_string();
        invalid_requests(Self::invalidators(), move || Self::random(&owner))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuctionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_id: Option<String>,
}

impl UpdateAuctionRequest {
    pub fn random() -> Self {
        Self {
            title: Some(fake::sentence()),
            description: Some(fake::paragraph()),
            image_id: None,
        }
    }
}

// ============================================================================
// BID
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBidRequest {
    pub auction_id: Option<String>,
    pub user: Option<String>,
    pub value: Option<f64>,
}

impl CreateBidRequest {
    pub fn new(auction_id: &str, user: &str, value: f64) -> Self {
        Self {
            auction_id: Some(auction_id.to_string()),
            user: Some(user.to_string()),
            value: Some(value),
        }
    }

    pub fn random(auction_id: &str, user: &str) -> Self {
        Self::new(auction_id, user, fake::price())
    }

    pub fn is_valid(&self) -> bool {
        required_string(&self.auction_id)
            && required_string(&self.user)
            && required_positive(&self.value)
    }

    pub fn invalidators() -> Vec<Invalidator<Self>> {
        vec![
            Invalidator::null("auctionId", |r| Self { auction_id: None, ..r }),
            Invalidator::empty("auctionId", |r| Self { auction_id: Some(String::new()), ..r }),
            Invalidator::null("user", |r| Self { user: None, ..r }),
            Invalidator::empty("user", |r| Self { user: Some(String::new()), ..r }),
            Invalidator::null("value", |r| Self { value: None, ..r }),
            Invalidator::negative("value", |r| Self { value: Some(-1.0), ..r }),
            Invalidator::zero("value", |r| Self { value: Some(0.0), ..r }),
        ]
    }

    pub fn invalid_requests(auction_id: &str, user: &str) -> Vec<InvalidRequest<Self>> {
        let auction_id = auction_id.to_string();
        let user = user.to_string();
        invalid_requests(Self::invalidators(), move || Self::random(&auction_id, &user))
    }
}

// ============================================================================
// QUESTION / REPLY
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub auction_id: Option<String>,
    pub user: Option<String>,
    pub text: Option<String>,
}

impl CreateQuestionRequest {
    pub fn random(user: &str, auction_id: &str) -> Self {
        Self {
            auction_id: Some(auction_id.to_string()),
            user: Some(user.to_string()),
            text: Some(fake::paragraph()),
        }
    }

    pub fn is_valid(&self) -> bool {
        required_string(&self.auction_id)
            && required_string(&self.user)
            && required_string(&self.text)
    }

    pub fn invalidators() -> Vec<Invalidator<Self>> {
        vec![
            Invalidator::null("auctionId", |r| Self { auction_id: None, ..r }),
            Invalidator::empty("auctionId", |r| Self { auction_id: Some(String::new()), ..r }),
            Invalidator::null("user", |r| Self { user: None, ..r }),
            Invalidator::empty("user", |r| Self { user: Some(String::new()), ..r }),
            Invalidator::null("text", |r| Self { text: None, ..r }),
            Invalidator::empty("text", |r| Self { text: Some(String::new()), ..r }),
        ]
    }

    pub fn invalid_requests(user: &str, auction_id: &str) -> Vec<InvalidRequest<Self>> {
        let user = user.to_string();
        let auction_id = auction_id.to_string();
        invalid_requests(Self::invalidators(), move || Self::random(&user, &auction_id))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplyRequest {
    pub reply: Option<String>,
}

impl CreateReplyRequest {
    pub fn random() -> Self {
        Self { reply: Some(fake::paragraph()) }
    }

    pub fn is_valid(&self) -> bool {
        required_string(&self.reply)
    }

    pub fn invalidators() -> Vec<Invalidator<Self>> {
        vec![
            Invalidator::null("reply", |r| Self { reply: None, ..r }),
            Invalidator::empty("reply", |r| Self { reply: Some(String::new()), ..r }),
        ]
    }

    pub fn invalid_requests() -> Vec<InvalidRequest<Self>> {
        invalid_requests(Self::invalidators(), Self::random)
    }
}
