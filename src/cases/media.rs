//! Binary media test cases.

use crate::clients::{Client, RawClient};
use crate::fake;
use crate::registry::Registry;
use crate::validator::validate;

pub fn register(registry: &mut Registry) {
    registry.register("media/upload image", |endpoints| {
        let client = RawClient::new(endpoints)?;
        let exchange = client.upload_media(&fake::bytes(64))?;
        validate(&exchange).status_code(200)?;
        Ok(())
    });

    registry.register("media/upload image and verify download", |endpoints| {
        let client = Client::new(endpoints)?;
        let image = fake::bytes(64);
        let media_id = client.upload_media(&image)?;
        let exchange = client.raw().download_media(&media_id)?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        validator.content_type("application/octet-stream")?;
        validator.content(&image)?;
        Ok(())
    });

    registry.register("media/download missing image", |endpoints| {
        let client = RawClient::new(endpoints)?;
        let exchange = client.download_media("missing")?;
        // 400 when "missing" fails media id syntax, 404 when it merely does
        // not exist.
        validate(&exchange).status_code([400, 404])?;
        Ok(())
    });
}
