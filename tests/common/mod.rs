//! In-process stub of the auction backend.
//!
//! Serves the same REST surface and status-code contract as the real service,
//! backed by in-memory state, so the suite and the CLI can be exercised
//! without a deployment. One thread serves requests sequentially, which is
//! all the sequential runner needs.

use std::collections::HashMap;
use std::io::Read;
use std::thread;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tiny_http::{Header, Method, Request, Response, Server};

use recon::AUTH_COOKIE;

pub struct StubServer {
    pub base: String,
}

/// Starts the stub on an ephemeral port and returns its base URL. The serving
/// thread is detached and lives until the test process exits.
pub fn spawn() -> StubServer {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    thread::spawn(move || {
        let mut state = State::default();
        for mut request in server.incoming_requests() {
            let reply = state.handle(&mut request);
            send(request, reply);
        }
    });
    StubServer { base: format!("http://127.0.0.1:{port}") }
}

#[derive(Default)]
struct State {
    counter: u64,
    users: HashMap<String, Value>,
    sessions: HashMap<String, String>,
    auctions: HashMap<String, Auction>,
    questions: HashMap<String, Question>,
    media: HashMap<String, Vec<u8>>,
}

struct Auction {
    view: Value,
    owner: String,
    end_time: DateTime<Utc>,
    bids: Vec<Value>,
}

impl Auction {
    fn is_closed(&self) -> bool {
        Utc::now() >= self.end_time
    }
}

struct Question {
    view: Value,
    auction_id: String,
    replied: bool,
}

struct Reply {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
    set_cookie: Option<String>,
}

impl Reply {
    fn status(status: u16) -> Self {
        Reply { status, content_type: "text/plain", body: Vec::new(), set_cookie: None }
    }

    fn json(value: &Value) -> Self {
        Reply {
            status: 200,
            content_type: "application/json",
            body: serde_json::to_vec(value).unwrap(),
            set_cookie: None,
        }
    }

    fn text(body: &str) -> Self {
        Reply {
            status: 200,
            content_type: "text/plain",
            body: body.as_bytes().to_vec(),
            set_cookie: None,
        }
    }

    fn bytes(body: Vec<u8>) -> Self {
        Reply { status: 200, content_type: "application/octet-stream", body, set_cookie: None }
    }
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}{}", self.counter)
    }

    fn handle(&mut self, request: &mut Request) -> Reply {
        let mut body = Vec::new();
        let _ = request.as_reader().read_to_end(&mut body);
        let session_user = self.session_user(request);

        let url = request.url().to_string();
        let path: Vec<&str> = url.split('/').filter(|s| !s.is_empty()).collect();
        let method = request.method().clone();

        match (&method, path.as_slice()) {
            (Method::Post, ["rest", "media"]) => self.upload_media(body),
            (Method::Get, ["rest", "media", id]) => self.download_media(id),

            (Method::Post, ["rest", "user"]) => self.create_user(&body),
            (Method::Post, ["rest", "user", "auth"]) => self.authenticate(&body),
            (Method::Get, ["rest", "user", id]) => self.get_user(id),
            (Method::Patch, ["rest", "user"]) => self.update_user(&body, session_user),
            (Method::Delete, ["rest", "user", id]) => self.delete_user(id, session_user),
            (Method::Get, ["rest", "user", id, "auctions"]) => self.list_user_auctions(id),
            (Method::Get, ["rest", "user", _, "following"]) => Reply::json(&json!([])),

            (Method::Get, ["rest", "auction", "any", _]) => self.list_open_auctions(),
            (Method::Post, ["rest", "auction"]) => self.create_auction(&body, session_user),
            (Method::Get, ["rest", "auction", id]) => self.get_auction(id),
            (Method::Patch, ["rest", "auction", id]) => {
                self.update_auction(id, &body, session_user)
            }
            (Method::Post, ["rest", "auction", id, "bid"]) => {
                self.create_bid(id, &body, session_user)
            }
            (Method::Get, ["rest", "auction", id, "bid"]) => self.list_bids(id),
            (Method::Post, ["rest", "auction", id, "question"]) => {
                self.create_question(id, &body, session_user)
            }
            (Method::Get, ["rest", "auction", id, "question"]) => self.list_questions(id),
            (Method::Post, ["rest", "auction", aid, "question", qid, "reply"]) => {
                self.create_reply(aid, qid, &body, session_user)
            }

            _ => Reply::status(404),
        }
    }

    fn session_user(&self, request: &Request) -> Option<String> {
        let cookies = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("Cookie"))?
            .value
            .to_string();
        for pair in cookies.split(';') {
            if let Some((name, token)) = pair.trim().split_once('=') {
                if name == AUTH_COOKIE {
                    return self.sessions.get(token).cloned();
                }
            }
        }
        None
    }

    // Media

    fn upload_media(&mut self, content: Vec<u8>) -> Reply {
        let id = self.next_id("m");
        self.media.insert(id.clone(), content);
        Reply::text(&id)
    }

    fn download_media(&self, id: &str) -> Reply {
        match self.media.get(id) {
            Some(content) => Reply::bytes(content.clone()),
            None => Reply::status(404),
        }
    }

    // Users

    fn create_user(&mut self, body: &[u8]) -> Reply {
        let Some(params) = parse_json(body) else { return Reply::status(400) };
        let (Some(id), Some(name), Some(pwd)) = (
            string_field(&params, "id"),
            string_field(&params, "name"),
            string_field(&params, "pwd"),
        ) else {
            return Reply::status(400);
        };
        if self.users.contains_key(&id) {
            return Reply::status(409);
        }
        let view = json!({
            "id": id,
            "name": name,
            "pwd": pwd,
            "photoId": params.get("photoId").cloned().unwrap_or(Value::Null),
        });
        self.users.insert(id, view.clone());
        Reply::json(&view)
    }

    fn authenticate(&mut self, body: &[u8]) -> Reply {
        let Some(params) = parse_json(body) else { return Reply::status(400) };
        let (Some(user), Some(pwd)) =
            (string_field(&params, "user"), string_field(&params, "pwd"))
        else {
            return Reply::status(400);
        };
        let Some(stored) = self.users.get(&user) else { return Reply::status(404) };
        if stored.get("pwd").and_then(Value::as_str) != Some(pwd.as_str()) {
            return Reply::status(401);
        }
        let token = self.next_id("t");
        self.sessions.insert(token.clone(), user);
        let mut reply = Reply::status(200);
        reply.set_cookie = Some(format!("{AUTH_COOKIE}={token}; Path=/"));
        reply
    }

    fn get_user(&self, id: &str) -> Reply {
        match self.users.get(id) {
            Some(user) => Reply::json(&json!({
                "id": user["id"],
                "name": user["name"],
                "photoId": user["photoId"],
            })),
            None => Reply::status(404),
        }
    }

    fn update_user(&mut self, body: &[u8], session_user: Option<String>) -> Reply {
        let Some(id) = session_user else { return Reply::status(401) };
        let Some(params) = parse_json(body) else { return Reply::status(400) };
        if let Some(user) = self.users.get_mut(&id) {
            for key in ["name", "pwd", "photoId"] {
                if let Some(value) = params.get(key) {
                    if !value.is_null() {
                        user[key] = value.clone();
                    }
                }
            }
        }
        Reply::status(204)
    }

    fn delete_user(&mut self, id: &str, session_user: Option<String>) -> Reply {
        if session_user.as_deref() != Some(id) {
            return Reply::status(401);
        }
        self.users.remove(id);
        self.sessions.retain(|_, user| user != id);
        Reply::status(204)
    }

    fn list_user_auctions(&self, id: &str) -> Reply {
        let auctions: Vec<Value> = self
            .auctions
            .values()
            .filter(|a| a.owner == id)
            .map(|a| self.auction_view(a))
            .collect();
        Reply::json(&Value::Array(auctions))
    }

    // Auctions

    fn create_auction(&mut self, body: &[u8], session_user: Option<String>) -> Reply {
        let Some(user) = session_user else { return Reply::status(401) };
        let Some(params) = parse_json(body) else { return Reply::status(400) };
        let (Some(title), Some(description), Some(owner), Some(end_time)) = (
            string_field(&params, "title"),
            string_field(&params, "description"),
            string_field(&params, "owner"),
            string_field(&params, "endTime"),
        ) else {
            return Reply::status(400);
        };
        let Some(minimum_price) = positive_field(&params, "minimumPrice") else {
            return Reply::status(400);
        };
        let Ok(parsed_end) = DateTime::parse_from_rfc3339(&end_time) else {
            return Reply::status(400);
        };
        if owner != user {
            return Reply::status(401);
        }
        let id = self.next_id("a");
        let view = json!({
            "id": id,
            "title": title,
            "description": description,
            "owner": owner.clone(),
            "imageId": params.get("imageId").cloned().unwrap_or(Value::Null),
            "endTime": end_time,
            "minimumPrice": minimum_price,
            "status": "OPEN",
            "bid": Value::Null,
        });
        self.auctions.insert(
            id,
            Auction {
                view: view.clone(),
                owner,
                end_time: parsed_end.with_timezone(&Utc),
                bids: Vec::new(),
            },
        );
        Reply::json(&view)
    }

    fn auction_view(&self, auction: &Auction) -> Value {
        let mut view = auction.view.clone();
        view["bid"] = auction.bids.last().cloned().unwrap_or(Value::Null);
        if auction.is_closed() {
            view["status"] = Value::String("CLOSED".to_string());
        }
        view
    }

    fn get_auction(&self, id: &str) -> Reply {
        match self.auctions.get(id) {
            Some(auction) => Reply::json(&self.auction_view(auction)),
            None => Reply::status(404),
        }
    }

    fn update_auction(&mut self, id: &str, body: &[u8], session_user: Option<String>) -> Reply {
        let Some(user) = session_user else { return Reply::status(401) };
        let Some(params) = parse_json(body) else { return Reply::status(400) };
        let Some(auction) = self.auctions.get_mut(id) else { return Reply::status(404) };
        if auction.owner != user {
            return Reply::status(401);
        }
        for key in ["title", "description", "imageId"] {
            if let Some(value) = params.get(key) {
                if !value.is_null() {
                    auction.view[key] = value.clone();
                }
            }
        }
        Reply::status(204)
    }

    fn list_open_auctions(&self) -> Reply {
        let auctions: Vec<Value> = self.auctions.values().map(|a| self.auction_view(a)).collect();
        Reply::json(&Value::Array(auctions))
    }

    // Bids

    fn create_bid(&mut self, auction_id: &str, body: &[u8], session_user: Option<String>) -> Reply {
        let Some(session) = session_user else { return Reply::status(401) };
        let Some(params) = parse_json(body) else { return Reply::status(400) };
        let (Some(_), Some(user)) =
            (string_field(&params, "auctionId"), string_field(&params, "user"))
        else {
            return Reply::status(400);
        };
        let Some(value) = positive_field(&params, "value") else { return Reply::status(400) };
        if user != session {
            return Reply::status(401);
        }
        let id = self.next_id("b");
        let Some(auction) = self.auctions.get_mut(auction_id) else { return Reply::status(404) };
        if auction.is_closed() {
            return Reply::status(409);
        }
        let top = auction
            .bids
            .last()
            .and_then(|b| b.get("value"))
            .and_then(Value::as_f64);
        if top.map_or(false, |current| value <= current) {
            return Reply::status(400);
        }
        let bid = json!({
            "id": id,
            "auctionId": auction_id,
            "user": user,
            "time": Value::Null,
            "value": value,
        });
        auction.bids.push(bid.clone());
        Reply::json(&bid)
    }

    fn list_bids(&self, auction_id: &str) -> Reply {
        match self.auctions.get(auction_id) {
            Some(auction) => Reply::json(&Value::Array(auction.bids.clone())),
            None => Reply::status(404),
        }
    }

    // Questions

    fn create_question(
        &mut self,
        auction_id: &str,
        body: &[u8],
        session_user: Option<String>,
    ) -> Reply {
        let Some(session) = session_user else { return Reply::status(401) };
        let Some(params) = parse_json(body) else { return Reply::status(400) };
        let (Some(_), Some(user), Some(text)) = (
            string_field(&params, "auctionId"),
            string_field(&params, "user"),
            string_field(&params, "text"),
        ) else {
            return Reply::status(400);
        };
        if user != session {
            return Reply::status(401);
        }
        if !self.auctions.contains_key(auction_id) {
            return Reply::status(404);
        }
        let id = self.next_id("q");
        let view = json!({
            "id": id,
            "auctionId": auction_id,
            "authorId": user,
            "text": text,
            "reply": Value::Null,
        });
        self.questions.insert(
            id,
            Question { view: view.clone(), auction_id: auction_id.to_string(), replied: false },
        );
        Reply::json(&view)
    }

    fn list_questions(&self, auction_id: &str) -> Reply {
        let questions: Vec<Value> = self
            .questions
            .values()
            .filter(|q| q.auction_id == auction_id)
            .map(|q| q.view.clone())
            .collect();
        Reply::json(&Value::Array(questions))
    }

    fn create_reply(
        &mut self,
        auction_id: &str,
        question_id: &str,
        body: &[u8],
        session_user: Option<String>,
    ) -> Reply {
        let Some(user) = session_user else { return Reply::status(401) };
        let Some(owner) = self.auctions.get(auction_id).map(|a| a.owner.clone()) else {
            return Reply::status(404);
        };
        if owner != user {
            return Reply::status(401);
        }
        let Some(params) = parse_json(body) else { return Reply::status(400) };
        let Some(reply) = string_field(&params, "reply") else { return Reply::status(400) };
        let Some(question) = self.questions.get_mut(question_id) else {
            return Reply::status(404);
        };
        if question.replied {
            return Reply::status(409);
        }
        question.replied = true;
        question.view["reply"] = Value::String(reply);
        Reply::text(question_id)
    }
}

fn parse_json(body: &[u8]) -> Option<Value> {
    serde_json::from_slice(body).ok()
}

/// Present, a string, and non-empty.
fn string_field(params: &Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Present, numeric, and strictly positive.
fn positive_field(params: &Value, key: &str) -> Option<f64> {
    params.get(key).and_then(Value::as_f64).filter(|v| *v > 0.0)
}

fn send(request: Request, reply: Reply) {
    let mut response = Response::from_data(reply.body)
        .with_status_code(reply.status)
        .with_header(
            Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()).unwrap(),
        );
    if let Some(cookie) = reply.set_cookie {
        response =
            response.with_header(Header::from_bytes(&b"Set-Cookie"[..], cookie.as_bytes()).unwrap());
    }
    let _ = request.respond(response);
}
