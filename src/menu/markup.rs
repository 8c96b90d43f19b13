use std::fmt::Write as _;

use super::Swatch;

/// HTML fragment for the switcher: a toggle, and a panel with one gradient
/// button per swatch. `open` and `active` select which elements carry the
/// `active` class.
pub(crate) fn render(swatches: &[Swatch], open: bool, active_key: &str) -> String {
    let open_class = if open { " active" } else { "" };
    let mut html = String::from("<div id=\"palette-switcher\">");
    let _ = write!(
        html,
        "<div class=\"palette-toggle{open_class}\">\u{1f3a8}</div>\
         <div class=\"palette-menu{open_class}\">"
    );
    for swatch in swatches {
        let key = swatch.id.key();
        let class = if key == active_key {
            " class=\"active\""
        } else {
            ""
        };
        let _ = write!(
            html,
            "<button data-palette=\"{key}\"{class} title=\"{}\" \
             style=\"background: {};\"></button>",
            swatch.title, swatch.gradient
        );
    }
    html.push_str("</div></div>");
    html
}
