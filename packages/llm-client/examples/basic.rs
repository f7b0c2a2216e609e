//! Basic chat completion example

use llm_client::{ChatRequest, LlmClient, Message, DEFAULT_MODEL};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize from environment
    let client = LlmClient::from_env()?;

    let response = client
        .chat_completion(
            ChatRequest::new(DEFAULT_MODEL)
                .message(Message::system("You are a careful fact-checking assistant."))
                .message(Message::user("In one sentence, what makes a news source credible?"))
                .temperature(0.0),
        )
        .await?;

    println!("Response: {}", response.content);

    if let Some(usage) = response.usage {
        println!("Tokens used: {}", usage.total_tokens);
    }

    Ok(())
}
