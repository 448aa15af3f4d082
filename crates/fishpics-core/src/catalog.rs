//! Family index page scraping.
//!
//! One page per family code: fetch the markup, walk it for `<img>` elements,
//! and derive species image names from their `src` attributes. Extraction is
//! tolerant by construction (a real HTML5 parse), so an empty family or a
//! reshaped page yields an empty list rather than an error; only the network
//! fetch itself can fail.

use crate::config::FetchConfig;
use crate::http;
use crate::naming::{self, FamilyCode};
use anyhow::Result;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Lists the species image names referenced by one family's index page, in
/// document order.
pub fn list_family(cfg: &FetchConfig, code: FamilyCode) -> Result<Vec<String>> {
    let url = naming::index_url(&cfg.index_base_url, code)?;
    let page = http::get(url.as_str(), &cfg.user_agent)?;
    Ok(image_names(&page))
}

/// Extracts species image names from raw index-page markup: every `<img>`
/// `src` value, in document order, mapped through
/// [`naming::species_image_name`].
pub fn image_names(markup: &[u8]) -> Vec<String> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .one(markup);

    let mut sources = Vec::new();
    collect_img_src(&dom.document, &mut sources);
    sources
        .iter()
        .map(|src| naming::species_image_name(src))
        .collect()
}

fn collect_img_src(node: &Handle, out: &mut Vec<String>) {
    if let NodeData::Element {
        ref name,
        ref attrs,
        ..
    } = node.data
    {
        if &*name.local == "img" {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == "src" {
                    out.push(attr.value.to_string());
                }
            }
        }
    }
    for child in node.children.borrow().iter() {
        collect_img_src(child, out);
    }
}
