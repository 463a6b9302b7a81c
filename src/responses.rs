//! Response DTOs echoed by the backend.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub id: String,
    pub name: String,
    pub pwd: String,
    pub photo_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub photo_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuctionStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidView {
    pub id: String,
    pub auction_id: String,
    pub user: String,
    pub time: Option<String>,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub owner: String,
    pub image_id: Option<String>,
    pub end_time: String,
    pub minimum_price: f64,
    pub status: AuctionStatus,
    pub bid: Option<BidView>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: String,
    pub auction_id: String,
    pub author_id: String,
    pub text: String,
    pub reply: Option<String>,
}
