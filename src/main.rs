use anyhow::Context;
use corkboard_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load corkboard settings")?;

    corkboard_telemetry::init(&settings.telemetry);

    corkboard_app::serve(settings).await
}
