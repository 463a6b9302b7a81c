//! User account test cases.

use crate::clients::Client;
use crate::registry::Registry;
use crate::requests::{AuthenticateUserRequest, CreateUserRequest, UpdateUserRequest};
use crate::responses::{AuctionView, CreateUserResponse, UserView};
use crate::validator::{parse_json, validate};
use crate::AUTH_COOKIE;

pub fn register(registry: &mut Registry) {
    registry.register("user/create user", |endpoints| {
        let client = Client::new(endpoints)?;
        let request = CreateUserRequest::random();
        let exchange = client.raw().create_user(&request)?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        let user: CreateUserResponse = parse_json(&exchange)?;
        validator.equals(Some(user.id.as_str()), request.id.as_deref(), "user id")?;
        validator.equals(Some(user.name.as_str()), request.name.as_deref(), "user name")?;
        validator.equals(Some(user.pwd.as_str()), request.pwd.as_deref(), "user pwd")?;
        Ok(())
    });

    registry.register("user/create duplicate user", |endpoints| {
        let client = Client::new(endpoints)?;
        let request = CreateUserRequest::random();
        client.create_user(&request)?;
        let exchange = client.raw().create_user(&request)?;
        validate(&exchange).status_code(409)?;
        Ok(())
    });

    registry.register("user/get user", |endpoints| {
        let client = Client::new(endpoints)?;
        let created = client.create_user(&CreateUserRequest::random())?;
        let exchange = client.raw().get_user(&created.id)?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        let user: UserView = parse_json(&exchange)?;
        validator.equals(user.id.as_str(), created.id.as_str(), "user id")?;
        validator.equals(user.name.as_str(), created.name.as_str(), "user name")?;
        Ok(())
    });

    registry.register("user/update user", |endpoints| {
        let client = Client::new(endpoints)?;
        client.create_user_and_auth()?;
        let exchange = client.raw().update_user(&UpdateUserRequest::random())?;
        validate(&exchange).status_code(204)?;
        Ok(())
    });

    registry.register("user/delete user", |endpoints| {
        let client = Client::new(endpoints)?;
        let user = client.create_user_and_auth()?;
        let exchange = client.raw().delete_user(&user.id)?;
        validate(&exchange).status_code(204)?;
        Ok(())
    });

    registry.register("user/delete missing user", |endpoints| {
        let client = Client::new(endpoints)?;
        let exchange = client.raw().delete_user("missing")?;
        validate(&exchange).status_code(401)?;
        Ok(())
    });

    registry.register("user/get followed auctions", |endpoints| {
        let client = Client::new(endpoints)?;
        let user = client.create_user_and_auth()?;
        let exchange = client.raw().list_user_followed_auctions(&user.id)?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        // A fresh account follows nothing.
        let followed: Vec<AuctionView> = parse_json(&exchange)?;
        validator.equals(followed.len(), 0, "followed auction count")?;
        Ok(())
    });

    registry.register("user/authenticate", |endpoints| {
        let client = Client::new(endpoints)?;
        let request = CreateUserRequest::random();
        client.create_user(&request)?;
        let auth = AuthenticateUserRequest::new(
            request.id.as_deref().unwrap_or(""),
            request.pwd.as_deref().unwrap_or(""),
        );
        let exchange = client.raw().authenticate_user(&auth)?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        validator.cookie_exists(AUTH_COOKIE)?;
        Ok(())
    });

    registry.register("user/authenticate with unknown id", |endpoints| {
        let client = Client::new(endpoints)?;
        let exchange = client
            .raw()
            .authenticate_user(&AuthenticateUserRequest::new("invalid", "invalid"))?;
        validate(&exchange).status_code(404)?;
        Ok(())
    });

    registry.register("user/authenticate with invalid password", |endpoints| {
        let client = Client::new(endpoints)?;
        let request = CreateUserRequest::random();
        let user = client.create_user(&request)?;
        let exchange = client
            .raw()
            .authenticate_user(&AuthenticateUserRequest::new(&user.id, "invalid"))?;
        validate(&exchange).status_code(401)?;
        Ok(())
    });

    registry.register_invalid(
        "user/create invalid",
        CreateUserRequest::invalidators(),
        |endpoints, invalidator| {
            let client = Client::new(endpoints)?;
            let request = invalidator.apply(CreateUserRequest::random());
            let exchange = client.raw().create_user(&request)?;
            validate(&exchange).status_code(400)?;
            Ok(())
        },
    );

    registry.register_invalid(
        "user/authenticate invalid",
        AuthenticateUserRequest::invalidators(),
        |endpoints, invalidator| {
            let client = Client::new(endpoints)?;
            let request = invalidator.apply(AuthenticateUserRequest::random());
            let exchange = client.raw().authenticate_user(&request)?;
            validate(&exchange).status_code_failure()?;
            Ok(())
        },
    );
}
