// src/map/legend.rs
use super::html::escape;
use crate::config::LegendBin;

/// Static legend pinned to the bottom-left corner above every map layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: String,
    pub bins: Vec<LegendBin>,
}

impl Legend {
    pub fn new(title: impl Into<String>, bins: Vec<LegendBin>) -> Self {
        Self {
            title: title.into(),
            bins,
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from(
            "<div class=\"map-legend\" style=\"position: fixed; bottom: 50px; left: 50px; \
             width: 200px; height: auto; border: 2px solid grey; background: white; \
             z-index: 9999; font-size: 14px; padding: 10px;\">\n",
        );
        html.push_str(&format!("    <b>{}</b><br>\n", escape(&self.title)));
        for bin in &self.bins {
            html.push_str(&format!(
                "    <i style=\"background: {}; width: 20px; height: 20px; display: inline-block;\"></i> &nbsp; {}<br>\n",
                escape(&bin.color),
                escape(&bin.label)
            ));
        }
        html.push_str("</div>\n");
        html
    }
}
