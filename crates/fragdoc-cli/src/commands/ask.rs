use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct AskArgs {
    /// The question, as free text
    #[arg(required = true)]
    pub question: Vec<String>,
}

pub async fn run(args: AskArgs) -> Result<()> {
    let mut controller = super::authenticated_controller().await?;
    controller.set_query(args.question.join(" "));
    controller.ask().await;

    match controller.response() {
        Some(answer) => println!("{}", answer),
        None => println!("Keine Frage gestellt"),
    }
    Ok(())
}
