use custom_chrome::logging;
use custom_chrome::settings::ChromeSettings;

const SETTINGS_FILE: &str = "chrome.json";

#[cfg(windows)]
fn main() -> anyhow::Result<()> {
    use custom_chrome::geometry::Rect;
    use custom_chrome::win32::ChromeWindow;

    let settings = ChromeSettings::load(SETTINGS_FILE)?;
    logging::init(
        settings.debug_logging,
        settings.log_file.as_ref().map(std::path::PathBuf::from),
    );
    tracing::info!(file = SETTINGS_FILE, "starting chrome demo");

    let window = ChromeWindow::create(
        "Custom chrome demo",
        Rect::new(200, 200, 640, 420),
        settings,
    )?;
    window.on_before_closing(|event| {
        tracing::info!(cancel = event.cancel, "closing demo window");
    });
    window.show();
    window.run();
    Ok(())
}

#[cfg(not(windows))]
fn main() -> anyhow::Result<()> {
    let settings = ChromeSettings::load(SETTINGS_FILE)?;
    logging::init(
        settings.debug_logging,
        settings.log_file.as_ref().map(std::path::PathBuf::from),
    );
    anyhow::bail!("the chrome demo needs Windows")
}
