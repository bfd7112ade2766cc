use load_state::{LoadState, Overlay, OverlayConfig};

/// One status line per published state: description, overlay caption and
/// the opacity the page underneath is drawn with.
pub fn render_line(state: &LoadState, config: &OverlayConfig) -> String {
    let overlay = Overlay::for_state(state);
    let caption = overlay.caption(config).unwrap_or_else(|| "-".into());
    format!(
        "{state} | overlay: {caption} | opacity: {:.2}",
        overlay.content_opacity(config)
    )
}
