//! Auction lifecycle and discovery test cases.

use crate::clients::Client;
use crate::registry::Registry;
use crate::requests::{CreateAuctionRequest, UpdateAuctionRequest};
use crate::responses::AuctionView;
use crate::validator::{parse_json, validate};

pub fn register(registry: &mut Registry) {
    registry.register("auction/create", |endpoints| {
        let client = Client::new(endpoints)?;
        let user = client.create_user_and_auth()?;
        let request = CreateAuctionRequest::random(&user.id);
        let exchange = client.raw().create_auction(&request)?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        let auction: AuctionView = parse_json(&exchange)?;
        validator.equals(Some(auction.title.as_str()), request.title.as_deref(), "auction title")?;
        validator.equals(
            Some(auction.description.as_str()),
            request.description.as_deref(),
            "auction description",
        )?;
        validator.equals(auction.owner.as_str(), user.id.as_str(), "auction owner")?;
        validator.equals(
            Some(auction.minimum_price),
            request.minimum_price,
            "auction minimum price",
        )?;
        Ok(())
    });

    registry.register("auction/create with invalid user", |endpoints| {
        // Fresh session, never authenticated.
        let client = Client::new(endpoints)?;
        let exchange = client
            .raw()
            .create_auction(&CreateAuctionRequest::random("invalid-user"))?;
        validate(&exchange).status_code(401)?;
        Ok(())
    });

    registry.register("auction/update", |endpoints| {
        let client = Client::new(endpoints)?;
        let (_, auction) = client.create_user_and_auction()?;
        let exchange = client
            .raw()
            .update_auction(&auction.id, &UpdateAuctionRequest::random())?;
        validate(&exchange).status_code(204)?;
        Ok(())
    });

    registry.register("auction/get user auctions", |endpoints| {
        let client = Client::new(endpoints)?;
        let user = client.create_user_and_auth()?;
        for _ in 0..3 {
            client.create_auction(&CreateAuctionRequest::random(&user.id))?;
        }
        let exchange = client.raw().list_user_auctions(&user.id)?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        let auctions: Vec<AuctionView> = parse_json(&exchange)?;
        validator.equals(auctions.len(), 3, "owned auction count")?;
        Ok(())
    });

    registry.register("auction/list recent", |endpoints| {
        let client = Client::new(endpoints)?;
        client.create_user_and_auction()?;
        let exchange = client.raw().list_recent_auctions()?;
        validate(&exchange).status_code(200)?;
        Ok(())
    });

    registry.register("auction/list popular", |endpoints| {
        let client = Client::new(endpoints)?;
        let exchange = client.raw().list_popular_auctions()?;
        validate(&exchange).status_code(200)?;
        Ok(())
    });

    registry.register("auction/list soon to close", |endpoints| {
        let client = Client::new(endpoints)?;
        client.create_user_and_auction()?;
        let exchange = client.raw().list_auctions_about_to_close()?;
        validate(&exchange).status_code(200)?;
        Ok(())
    });

    registry.register_invalid(
        "auction/create invalid with",
        CreateAuctionRequest::invalidators(),
        |endpoints, invalidator| {
            let client = Client::new(endpoints)?;
            let user = client.create_user_and_auth()?;
            let request = invalidator.apply(CreateAuctionRequest::random(&user.id));
            let exchange = client.raw().create_auction(&request)?;
            validate(&exchange).status_code([400, 401])?;
            Ok(())
        },
    );
}
