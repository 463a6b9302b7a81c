//! Question and reply test cases.

use crate::clients::Client;
use crate::registry::Registry;
use crate::requests::{CreateQuestionRequest, CreateReplyRequest};
use crate::responses::QuestionView;
use crate::validator::{parse_json, validate};

pub fn register(registry: &mut Registry) {
    registry.register("question/create", |endpoints| {
        let client = Client::new(endpoints)?;
        let (user, auction) = client.create_user_and_auction()?;
        let request = CreateQuestionRequest::random(&user.id, &auction.id);
        let exchange = client.raw().create_question(&auction.id, &request)?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        if exchange.response.body.is_empty() {
            validator.fail("response body is empty")?;
        }
        let question: QuestionView = parse_json(&exchange)?;
        validator.equals(question.author_id.as_str(), user.id.as_str(), "question author")?;
        validator.equals(Some(question.text.as_str()), request.text.as_deref(), "question text")?;
        validator.equals(question.reply.as_deref(), None, "question reply")?;
        Ok(())
    });

    registry.register("question/create with invalid user", |endpoints| {
        let owner = Client::new(endpoints)?;
        let stranger = Client::new(endpoints)?;
        let (user, auction) = owner.create_user_and_auction()?;
        let exchange = stranger.raw().create_question(
            &auction.id,
            &CreateQuestionRequest::random(&user.id, &auction.id),
        )?;
        validate(&exchange).status_code(401)?;
        Ok(())
    });

    registry.register("question/create reply", |endpoints| {
        let client = Client::new(endpoints)?;
        let (user, auction) = client.create_user_and_auction()?;
        let question = client.create_random_question(&user.id, &auction.id)?;
        let exchange =
            client
                .raw()
                .create_reply(&auction.id, &question.id, &CreateReplyRequest::random())?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        validator.equals(exchange.response.text().as_ref(), question.id.as_str(), "question id")?;
        Ok(())
    });

    registry.register("question/create reply with invalid user", |endpoints| {
        let owner = Client::new(endpoints)?;
        let stranger = Client::new(endpoints)?;
        let (user, auction) = owner.create_user_and_auction()?;
        let question = owner.create_random_question(&user.id, &auction.id)?;
        let exchange = stranger.raw().create_reply(
            &auction.id,
            &question.id,
            &CreateReplyRequest::random(),
        )?;
        validate(&exchange).status_code(401)?;
        Ok(())
    });

    registry.register("question/list auction questions", |endpoints| {
        let client = Client::new(endpoints)?;
        let (user, auction) = client.create_user_and_auction()?;
        let first = client.create_random_question(&user.id, &auction.id)?;
        let second = client.create_random_question(&user.id, &auction.id)?;

        let exchange = client.raw().list_questions(&auction.id)?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        let questions: Vec<QuestionView> = parse_json(&exchange)?;
        validator.equals(questions.len(), 2, "question count")?;
        for expected in [&first, &second] {
            if !questions.iter().any(|q| q.id == expected.id) {
                validator.fail("created question missing from the listing")?;
            }
        }
        Ok(())
    });

    registry.register("question/create two replies", |endpoints| {
        let client = Client::new(endpoints)?;
        let (user, auction) = client.create_user_and_auction()?;
        let question = client.create_random_question(&user.id, &auction.id)?;

        let exchange =
            client
                .raw()
                .create_reply(&auction.id, &question.id, &CreateReplyRequest::random())?;
        let validator = validate(&exchange);
        validator.status_code(200)?;
        validator.equals(exchange.response.text().as_ref(), question.id.as_str(), "question id")?;

        // The question is already answered now.
        let exchange =
            client
                .raw()
                .create_reply(&auction.id, &question.id, &CreateReplyRequest::random())?;
        validate(&exchange).status_code(409)?;
        Ok(())
    });

    registry.register_invalid(
        "question/create invalid",
        CreateQuestionRequest::invalidators(),
        |endpoints, invalidator| {
            let client = Client::new(endpoints)?;
            let (user, auction) = client.create_user_and_auction()?;
            let request = invalidator.apply(CreateQuestionRequest::random(&user.id, &auction.id));
            let exchange = client.raw().create_question(&auction.id, &request)?;
            validate(&exchange).status_code_failure()?;
            Ok(())
        },
    );
}
