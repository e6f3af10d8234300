use crate::news::Search;
use askama::Template;

/// Language filters offered in the search form, as upstream's ISO-639-1 codes.
const LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("de", "German"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("it", "Italian"),
    ("nl", "Dutch"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
];

pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
    pub selected: bool,
}

/// The single results page. Without a search it renders the empty landing state.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage<'a> {
    pub search: Option<&'a Search>,
    pub languages: Vec<LanguageOption>,
}

pub fn render(search: Option<&Search>) -> Result<String, askama::Error> {
    let current = search.and_then(|s| s.language.as_deref());
    let languages = LANGUAGES
        .iter()
        .map(|&(code, name)| LanguageOption {
            code,
            name,
            selected: current == Some(code),
        })
        .collect();
    IndexPage { search, languages }.render()
}
