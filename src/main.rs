/*
 * Responsibility
 * - tokio runtime entry
 * - calls app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    notes_api::app::run().await
}
