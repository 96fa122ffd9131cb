//! Ask command - answers one query and prints the outcome

use clap::Args;
use serde_json::json;

#[derive(Args, Clone)]
pub struct AskArgs {
    /// The question to answer
    pub query: String,

    /// Session to attribute the interaction to
    #[arg(long)]
    pub session_id: Option<String>,

    /// Also grade the answer and print the scores
    #[arg(long)]
    pub evaluate: bool,
}

pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    let mut config = super::bootstrap();
    // A one-shot process exits before a background job would finish
    config.evaluation.enabled = false;

    let state = crate::create_app_state_with_config(&config).await?;

    let outcome = state.engine.process(&args.query, args.session_id).await;

    let scores = if args.evaluate {
        let input = crate::domain::evaluation::EvaluationInput::new(
            args.query.as_str(),
            outcome.response.as_str(),
        )
        .with_contexts(outcome.contexts())
        .with_transaction_id(outcome.transaction_id.as_str());

        Some(state.pipeline.evaluate(input).await.to_map())
    } else {
        None
    };

    let mut output = json!({
        "response": outcome.response,
        "transaction_id": outcome.transaction_id,
        "session_id": outcome.session_id,
        "retrieved_documents": outcome.retrieved_documents,
        "route_taken": outcome.route,
    });

    if let Some(scores) = scores {
        output["evaluation"] = json!(scores);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
