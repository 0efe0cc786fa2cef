use anyhow::Result;
use console::style;

pub async fn run() -> Result<()> {
    let controller = super::authenticated_controller().await?;
    debug_assert!(controller.is_authenticated());
    println!("{} Angemeldet", style("✓").green());
    Ok(())
}
