//! Headless-browser slide source.
//!
//! One Chrome session per capture run. Navigation readiness comes from
//! the browser's own navigation event; the "next" control is waited for
//! with a bounded poll rather than a blind sleep. The only fixed delay
//! left is a short post-click pause to let the next slide render, since
//! slide transitions do not change the page URL.

use std::sync::Arc;
use std::time::Duration;

use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions, Tab};

use slidecap_core::{Error, Result};

use crate::source::SlideSource;

/// CSS selector of the slide-advance control on the presentation pages.
pub const DEFAULT_NEXT_SELECTOR: &str = "button[aria-label='Next']";

/// How long to wait for the "next" control before treating the
/// presentation as finished.
pub const DEFAULT_ADVANCE_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause after clicking "next" so the new slide can render.
pub const DEFAULT_RENDER_DELAY: Duration = Duration::from_secs(2);

/// Browser-backed [`SlideSource`].
///
/// The Chrome process is owned by this value and shut down when it is
/// dropped, on every exit path.
pub struct BrowserSlideSource {
    _browser: Browser,
    tab: Arc<Tab>,
    next_selector: String,
    advance_timeout: Duration,
    render_delay: Duration,
}

impl BrowserSlideSource {
    /// Launch a headless browser and navigate to the presentation page.
    ///
    /// Returns once the initial navigation has completed.
    pub fn open(url: &str) -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|e| Error::BrowserError(format!("Bad launch options: {}", e)))?;
        let browser = Browser::new(options)
            .map_err(|e| Error::BrowserError(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::BrowserError(format!("Failed to open tab: {}", e)))?;
        tab.navigate_to(url)
            .map_err(|e| Error::BrowserError(format!("Failed to navigate to {}: {}", url, e)))?;
        tab.wait_until_navigated()
            .map_err(|e| Error::BrowserError(format!("Page never finished loading: {}", e)))?;

        log::info!("Opened presentation page {}", url);

        Ok(Self {
            _browser: browser,
            tab,
            next_selector: DEFAULT_NEXT_SELECTOR.to_string(),
            advance_timeout: DEFAULT_ADVANCE_TIMEOUT,
            render_delay: DEFAULT_RENDER_DELAY,
        })
    }

    /// Override the CSS selector of the slide-advance control.
    pub fn with_next_selector(mut self, selector: impl Into<String>) -> Self {
        self.next_selector = selector.into();
        self
    }

    /// Override how long to wait for the advance control.
    pub fn with_advance_timeout(mut self, timeout: Duration) -> Self {
        self.advance_timeout = timeout;
        self
    }

    /// Override the post-click render pause.
    pub fn with_render_delay(mut self, delay: Duration) -> Self {
        self.render_delay = delay;
        self
    }
}

impl SlideSource for BrowserSlideSource {
    fn capture(&mut self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| Error::BrowserError(format!("Screenshot failed: {}", e)))
    }

    fn advance(&mut self) -> Result<()> {
        let element = self
            .tab
            .wait_for_element_with_custom_timeout(&self.next_selector, self.advance_timeout)
            .map_err(|e| {
                Error::BrowserError(format!(
                    "Next control '{}' not found: {}",
                    self.next_selector, e
                ))
            })?;
        element
            .click()
            .map_err(|e| Error::BrowserError(format!("Failed to click next control: {}", e)))?;

        std::thread::sleep(self.render_delay);
        Ok(())
    }
}
