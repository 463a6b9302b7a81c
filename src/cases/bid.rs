//! Bidding test cases.

use crate::clients::Client;
use crate::registry::Registry;
use crate::requests::CreateBidRequest;
use crate::responses::{AuctionView, BidView};
use crate::validator::{parse_json, validate};

pub fn register(registry: &mut Registry) {
    registry.register("bid/create", |endpoints| {
        let client = Client::new(endpoints)?;
        let (user, auction) = client.create_user_and_auction()?;
        let request = CreateBidRequest::new(&auction.id, &user.id, 100.0);
        let exchange = client.raw().create_bid(&request)?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        if exchange.response.body.is_empty() {
            validator.fail("response body is empty")?;
        }
        let bid: BidView = parse_json(&exchange)?;
        validator.equals(bid.auction_id.as_str(), auction.id.as_str(), "bid auction")?;
        validator.equals(bid.user.as_str(), user.id.as_str(), "bid user")?;
        validator.equals(Some(bid.value), request.value, "bid value")?;
        Ok(())
    });

    registry.register("bid/create two", |endpoints| {
        let client = Client::new(endpoints)?;
        let (user, auction) = client.create_user_and_auction()?;
        client.create_bid(&CreateBidRequest::new(&auction.id, &user.id, 100.0))?;
        let request = CreateBidRequest::new(&auction.id, &user.id, 200.0);
        let exchange = client.raw().create_bid(&request)?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        let bid: BidView = parse_json(&exchange)?;
        validator.equals(Some(bid.value), request.value, "bid value")?;
        Ok(())
    });

    registry.register("bid/create equal price", |endpoints| {
        let client = Client::new(endpoints)?;
        let (user, auction) = client.create_user_and_auction()?;
        client.create_bid(&CreateBidRequest::new(&auction.id, &user.id, 100.0))?;
        let exchange = client
            .raw()
            .create_bid(&CreateBidRequest::new(&auction.id, &user.id, 100.0))?;
        validate(&exchange).status_code_failure()?;
        Ok(())
    });

    registry.register("bid/create lower price", |endpoints| {
        let client = Client::new(endpoints)?;
        let (user, auction) = client.create_user_and_auction()?;
        client.create_bid(&CreateBidRequest::new(&auction.id, &user.id, 100.0))?;
        let exchange = client
            .raw()
            .create_bid(&CreateBidRequest::new(&auction.id, &user.id, 50.0))?;
        validate(&exchange).status_code_failure()?;
        Ok(())
    });

    registry.register("bid/list auction bids", |endpoints| {
        let client = Client::new(endpoints)?;
        let (user, auction) = client.create_user_and_auction()?;
        client.create_bid(&CreateBidRequest::new(&auction.id, &user.id, 100.0))?;
        client.create_bid(&CreateBidRequest::new(&auction.id, &user.id, 200.0))?;

        let exchange = client.raw().list_bids(&auction.id)?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        let bids: Vec<BidView> = parse_json(&exchange)?;
        let mut values: Vec<f64> = bids.iter().map(|b| b.value).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        validator.equals(values, vec![100.0, 200.0], "bid values")?;
        Ok(())
    });

    registry.register("bid/create and check auction", |endpoints| {
        let client = Client::new(endpoints)?;
        let (user, auction) = client.create_user_and_auction()?;

        client.create_bid(&CreateBidRequest::new(&auction.id, &user.id, 100.0))?;
        let exchange = client.raw().get_auction(&auction.id)?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        let fetched: AuctionView = parse_json(&exchange)?;
        validator.equals(
            fetched.bid.as_ref().map(|b| b.value),
            Some(100.0),
            "top bid after first bid",
        )?;

        client.create_bid(&CreateBidRequest::new(&auction.id, &user.id, 200.0))?;
        let exchange = client.raw().get_auction(&auction.id)?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        let fetched: AuctionView = parse_json(&exchange)?;
        validator.equals(
            fetched.bid.as_ref().map(|b| b.value),
            Some(200.0),
            "top bid after outbid",
        )?;
        Ok(())
    });

    registry.register_invalid(
        "bid/create invalid",
        CreateBidRequest::invalidators(),
        |endpoints, invalidator| {
            let client = Client::new(endpoints)?;
            let (user, auction) = client.create_user_and_auction()?;
            let request = invalidator.apply(CreateBidRequest::random(&auction.id, &user.id));
            let exchange = client.raw().create_bid(&request)?;
            validate(&exchange).status_code_failure()?;
            Ok(())
        },
    );
}
