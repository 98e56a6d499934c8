//! Deterministic placeholder thumbnails.
//!
//! # Invariants
//! - Output depends only on the seed; identical seeds give byte-identical URIs.
//! - Seed text is escaped before it lands inside SVG markup.

use crate::markup::escape_xml_text;

const THUMB_WIDTH: u32 = 1200;
const THUMB_HEIGHT: u32 = 675;
const HUE_BASE: u32 = 120;
const HUE_SPREAD: u32 = 70;

/// Gradient start hue for `seed`, in `[0, 360)`.
pub fn seed_hue(seed: &str) -> u32 {
    seed.chars()
        .fold(HUE_BASE, |acc, c| (acc + u32::from(c)) % 360)
}

/// SVG markup for a 1200x675 gradient card labelled with `seed`.
pub fn thumb_svg(seed: &str) -> String {
    let hue = seed_hue(seed);
    let end_hue = (hue + HUE_SPREAD) % 360;
    let label = escape_xml_text(seed);
    format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{THUMB_WIDTH}' height='{THUMB_HEIGHT}'>\
<defs><linearGradient id='g' x1='0' y1='0' x2='1' y2='1'>\
<stop offset='0%' stop-color='hsl({hue},70%,55%)'/>\
<stop offset='100%' stop-color='hsl({end_hue},70%,55%)'/></linearGradient></defs>\
<rect width='100%' height='100%' fill='url(#g)'/>\
<text x='50%' y='54%' dominant-baseline='middle' text-anchor='middle' fill='rgba(0,0,0,.3)' \
font-family='Inter,Arial' font-size='86' font-weight='800'>{label}</text>\
</svg>"
    )
}

/// Placeholder image as a percent-encoded `data:` URI.
pub fn generated_thumb(seed: &str) -> String {
    format!("data:image/svg+xml,{}", urlencoding::encode(&thumb_svg(seed)))
}

#[cfg(test)]
mod tests {
    use super::{generated_thumb, seed_hue, thumb_svg};

    #[test]
    fn empty_seed_uses_base_hue() {
        assert_eq!(seed_hue(""), 120);
        assert!(thumb_svg("").contains("hsl(120,70%,55%)"));
        assert!(thumb_svg("").contains("hsl(190,70%,55%)"));
    }

    #[test]
    fn hue_sums_code_points_modulo_360() {
        // 'A' = 65, 'B' = 66 -> 120 + 131 = 251
        assert_eq!(seed_hue("AB"), 251);
        // 120 + 240 wraps to 0
        assert_eq!(seed_hue("xx"), 0);
    }

    #[test]
    fn end_hue_wraps() {
        // 'z' = 122 -> hue 242, end 312; "zz" -> 364 % 360 = 4, end 74
        assert!(thumb_svg("zz").contains("hsl(4,70%,55%)"));
        assert!(thumb_svg("zz").contains("hsl(74,70%,55%)"));
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(generated_thumb("Portfolio"), generated_thumb("Portfolio"));
        assert_ne!(generated_thumb("Portfolio"), generated_thumb("portfolio"));
    }

    #[test]
    fn markup_in_seed_is_escaped() {
        let svg = thumb_svg("<script>");
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));

        let uri = generated_thumb("<script>");
        assert!(uri.starts_with("data:image/svg+xml,"));
        assert!(!uri.contains("<script>"));
        let decoded = urlencoding::decode(&uri["data:image/svg+xml,".len()..])
            .expect("valid percent encoding");
        assert!(!decoded.contains("<script>"));
    }

    #[test]
    fn declares_fixed_canvas_size() {
        let svg = thumb_svg("x");
        assert!(svg.contains("width='1200'"));
        assert!(svg.contains("height='675'"));
    }
}
