//! WASM bindings for the paginator

use crate::document::{ScreenplayBlock, TitlePage};
use crate::layout::{Page, Pagination, Paginator, PaginatorConfig};
use crate::render::{DisplayList, PageDiff};
use crate::ConfigError;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js_error(err: ConfigError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Parse the JSON block list JS hands us
fn parse_blocks(blocks_json: &str) -> Result<Vec<ScreenplayBlock>, ConfigError> {
    serde_json::from_str(blocks_json).map_err(|e| ConfigError::Blocks(e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ConfigError> {
    serde_json::to_string(value).map_err(|e| ConfigError::Serialize(e.to_string()))
}

/// Everything a canvas renderer needs after an edit
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderData<'a> {
    pub page_count: usize,
    pub display: DisplayList,
    pub diff: PageDiff,
    pub pagination: &'a Pagination,
}

/// WASM-exposed paginator wrapper
#[wasm_bindgen]
pub struct WasmPaginator {
    paginator: Paginator,
    title_page: Option<TitlePage>,
    last_pages: Vec<Page>,
}

impl WasmPaginator {
    fn from_paginator(paginator: Paginator) -> Self {
        Self {
            paginator,
            title_page: None,
            last_pages: Vec::new(),
        }
    }

    fn try_set_title_page(&mut self, title_json: &str) -> Result<(), ConfigError> {
        let title: TitlePage =
            serde_json::from_str(title_json).map_err(|e| ConfigError::TitlePage(e.to_string()))?;
        self.title_page = Some(title);
        Ok(())
    }

    fn paginate_blocks(&self, blocks: &[ScreenplayBlock]) -> Pagination {
        match &self.title_page {
            Some(title) => self.paginator.paginate_with_title(blocks, title),
            None => self.paginator.paginate(blocks),
        }
    }

    fn try_with_config(config_json: &str) -> Result<Self, ConfigError> {
        let config = PaginatorConfig::from_json(config_json)?;
        Ok(Self::from_paginator(Paginator::new(config)))
    }

    fn paginate_json(&self, blocks_json: &str) -> Result<String, ConfigError> {
        let blocks = parse_blocks(blocks_json)?;
        to_json(&self.paginate_blocks(&blocks))
    }

    fn render_json(&mut self, blocks_json: &str) -> Result<String, ConfigError> {
        let blocks = parse_blocks(blocks_json)?;
        let pagination = self.paginate_blocks(&blocks);
        let display = DisplayList::build(&pagination, &self.paginator);
        let diff = PageDiff::between(&self.last_pages, &pagination.pages);

        let json = to_json(&RenderData {
            page_count: pagination.page_count(),
            display,
            diff,
            pagination: &pagination,
        })?;
        self.last_pages = pagination.pages;
        Ok(json)
    }
}

#[wasm_bindgen]
impl WasmPaginator {
    /// Create a paginator with the standard US Letter screenplay layout
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_paginator(Paginator::default())
    }

    /// Create a paginator from a JSON config; missing fields keep defaults
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<WasmPaginator, JsValue> {
        Self::try_with_config(config_json).map_err(to_js_error)
    }

    /// Paginate a JSON block list; returns pages, issues and report as JSON
    pub fn paginate(&self, blocks_json: &str) -> Result<String, JsValue> {
        self.paginate_json(blocks_json).map_err(to_js_error)
    }

    /// Paginate and lay out for drawing, diffed against the previous render
    pub fn render(&mut self, blocks_json: &str) -> Result<String, JsValue> {
        self.render_json(blocks_json).map_err(to_js_error)
    }

    /// Get page count, title page included
    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self, blocks_json: &str) -> Result<usize, JsValue> {
        let blocks = parse_blocks(blocks_json).map_err(to_js_error)?;
        Ok(self.paginate_blocks(&blocks).page_count())
    }

    /// Put a title page (JSON `{title, author, description, contact, date}`)
    /// in front of the script; a blank title adds no page
    #[wasm_bindgen(js_name = setTitlePage)]
    pub fn set_title_page(&mut self, title_json: &str) -> Result<(), JsValue> {
        self.try_set_title_page(title_json).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = clearTitlePage)]
    pub fn clear_title_page(&mut self) {
        self.title_page = None;
    }

    /// Usable content height per page, in points
    #[wasm_bindgen(js_name = contentHeight)]
    pub fn content_height(&self) -> f32 {
        self.paginator.content_height_pt()
    }

    /// Geometry problems found at construction, one message each
    #[wasm_bindgen(js_name = configErrors)]
    pub fn config_errors(&self) -> Vec<String> {
        self.paginator
            .config_errors()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

impl Default for WasmPaginator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const SCENE: &str = r#"[
        {"id": "s1", "type": "scene_heading", "content": "INT. DINER - NIGHT"},
        {"id": "c1", "type": "character", "content": "MAE"},
        {"id": "d1", "type": "dialogue", "content": "Coffee?"}
    ]"#;

    #[test]
    fn test_paginate_json_shape() {
        let paginator = WasmPaginator::new();
        let json = paginator.paginate_json(SCENE).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        let pages = value["pages"].as_array().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0]["pageNumber"], 1);
        assert_eq!(pages[0]["blocks"][1]["type"], "character");
        assert!(pages[0]["usedHeight"].as_f64().unwrap() > 0.0);
        assert_eq!(value["report"]["isValid"], true);
        assert!(value["issues"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_missing_content_defaults_to_empty() {
        let paginator = WasmPaginator::new();
        let json = paginator
            .paginate_json(r#"[{"id": "a", "type": "action"}]"#)
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pages"][0]["blocks"][0]["content"], "");
    }

    #[test]
    fn test_bad_block_json() {
        let paginator = WasmPaginator::new();
        let err = paginator
            .paginate_json(r#"[{"id": "x", "type": "montage"}]"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Blocks(_)));
    }

    #[test]
    fn test_with_config() {
        let paginator =
            WasmPaginator::try_with_config(r#"{"geometry": {"page_height_mm": 100.0}}"#).unwrap();
        let default = WasmPaginator::new();
        assert!(paginator.content_height() < default.content_height());
        assert!(paginator.config_errors().is_empty());

        assert!(matches!(
            WasmPaginator::try_with_config("[1, 2"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_config_errors_listed_once() {
        let paginator = WasmPaginator::try_with_config(
            r#"{"geometry": {"page_width_mm": 120.0, "page_height_mm": 40.0}}"#,
        )
        .unwrap();
        let errors = paginator.config_errors();
        assert_eq!(errors.len(), paginator.paginator.config_errors().len());

        let mut unique = errors.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), errors.len());
        assert!(errors.iter().any(|e| e.starts_with("Page content area")));
    }

    #[test]
    fn test_serialize_failure_is_not_a_config_error() {
        use std::collections::BTreeMap;

        // JSON object keys must be strings
        let mut map = BTreeMap::new();
        map.insert((1u8, 2u8), 3u8);
        let err = to_json(&map).unwrap_err();
        assert!(matches!(err, ConfigError::Serialize(_)));
        assert!(err.to_string().starts_with("Failed to serialize output"));
    }

    #[test]
    fn test_title_page() {
        let mut paginator = WasmPaginator::new();
        paginator
            .try_set_title_page(r#"{"title": "Night Shift", "author": "Ana Ruiz"}"#)
            .unwrap();

        let value: Value = serde_json::from_str(&paginator.paginate_json(SCENE).unwrap()).unwrap();
        assert_eq!(value["titlePage"]["title"], "Night Shift");
        assert_eq!(value["pages"][0]["pageNumber"], 2);

        let rendered: Value =
            serde_json::from_str(&paginator.render_json(SCENE).unwrap()).unwrap();
        assert_eq!(rendered["pageCount"], 2);
        assert_eq!(rendered["display"]["pages"][0]["items"][0]["text"], "NIGHT SHIFT");

        assert!(matches!(
            paginator.try_set_title_page(r#"{"title": 5}"#),
            Err(ConfigError::TitlePage(_))
        ));

        paginator.clear_title_page();
        let value: Value = serde_json::from_str(&paginator.paginate_json(SCENE).unwrap()).unwrap();
        assert!(value.get("titlePage").is_none());
        assert_eq!(value["pages"][0]["pageNumber"], 1);
    }

    #[test]
    fn test_render_diffs_against_previous() {
        let mut paginator = WasmPaginator::new();
        let first: Value = serde_json::from_str(&paginator.render_json(SCENE).unwrap()).unwrap();
        assert_eq!(first["pageCount"], 1);
        assert_eq!(first["diff"]["changes"][0]["type"], "added");
        assert_eq!(first["display"]["pages"][0]["items"][0]["text"], "INT. DINER - NIGHT");

        let second: Value = serde_json::from_str(&paginator.render_json(SCENE).unwrap()).unwrap();
        assert!(second["diff"]["changes"].as_array().unwrap().is_empty());
        assert!(second["diff"]["movedBlocks"].as_array().unwrap().is_empty());
    }
}
