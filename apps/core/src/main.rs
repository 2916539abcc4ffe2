// Intent Chat entry point
// Terminal front end around the intent pipeline and the speech collaborators.

use anyhow::Context;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

use intent_chat::config::ChatbotConfig;
use intent_chat::session::ChatSession;
use intent_chat::speech::{
    LoggingSynthesizer, MutedSynthesizer, SpeechRecognizer, SpeechSynthesizer,
    UnavailableRecognizer,
};
use intent_chat::{initialize, logging};

const BANNER: &str = "Smart NLP Chatbot with Voice. Type a message, /voice to speak, /quit to exit.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let config = ChatbotConfig::from_env().context("invalid configuration")?;
    let pipeline = match initialize(&config) {
        Ok(p) => Arc::new(p),
        Err(e) => {
            error!("Failed to initialize intent pipeline: {}", e);
            return Err(e).context("intent pipeline initialization failed");
        }
    };

    let synthesizer: Arc<dyn SpeechSynthesizer> = if config.speech.enabled {
        Arc::new(LoggingSynthesizer)
    } else {
        Arc::new(MutedSynthesizer)
    };
    let recognizer: Arc<dyn SpeechRecognizer> = Arc::new(UnavailableRecognizer);
    let mut session = ChatSession::new(pipeline, synthesizer, recognizer, &config);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    stdout.write_all(format!("{}\n", BANNER).as_bytes()).await?;

    let mut printed = 0;
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" | "/exit" => break,
            "/voice" => {
                if config.speech.enabled {
                    session.listen_microphone().await;
                } else {
                    stdout.write_all(b"Voice input is disabled.\n").await?;
                }
            }
            _ => {
                session.send_message(&line).await;
            }
        }

        let transcript = session.transcript();
        for entry in &transcript[printed..] {
            stdout.write_all(format!("{}\n", entry).as_bytes()).await?;
        }
        if transcript.len() > printed {
            stdout.write_all(b"\n").await?;
        }
        printed = transcript.len();
        stdout.flush().await?;
    }

    info!(lines = printed, "chat session closed");
    Ok(())
}
