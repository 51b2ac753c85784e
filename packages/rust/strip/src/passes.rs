//! Search-UI removal passes for built HTML.
//!
//! Each pass is a literal regex substitution `&str -> String`, applied in
//! sequence. Nothing here parses HTML: nested `<form>`/`<div>` tags end the
//! match at the first closing tag.

use std::sync::LazyLock;

use regex::Regex;

use bookprep_shared::InputRule;

/// Run every pass over one HTML document, in fixed order.
pub(crate) fn run_pipeline(html: &str, rule: InputRule) -> String {
    let mut result = remove_search_forms(html);
    result = remove_search_containers(&result);
    result = remove_search_inputs(&result, rule);
    result
}

// ---------------------------------------------------------------------------
// Pass 1: <form ...search...>...</form>
// ---------------------------------------------------------------------------

fn remove_search_forms(html: &str) -> String {
    static FORM_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?s)<form[^>]*?search[^>]*?>.*?</form>").expect("valid regex")
    });

    FORM_RE.replace_all(html, "").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 2: <div class="...bd-search...">...</div>
// ---------------------------------------------------------------------------

fn remove_search_containers(html: &str) -> String {
    static DIV_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"(?s)<div[^>]*?class="[^"]*bd-search[^"]*"[^>]*?>.*?</div>"#)
            .expect("valid regex")
    });

    DIV_RE.replace_all(html, "").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 3: <input ...search...>
// ---------------------------------------------------------------------------

/// Remove `<input>` tags mentioning `search`.
///
/// [`InputRule::ToEnd`] drops everything from the first such tag onward.
fn remove_search_inputs(html: &str, rule: InputRule) -> String {
    static INPUT_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"<input[^>]*?search[^>]*?>").expect("valid regex")
    });
    static INPUT_TO_END_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?s)<input[^>]*?search[^>]*?>.*").expect("valid regex")
    });

    match rule {
        InputRule::Tag => INPUT_RE.replace_all(html, "").into_owned(),
        InputRule::ToEnd => INPUT_TO_END_RE.replace_all(html, "").into_owned(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
