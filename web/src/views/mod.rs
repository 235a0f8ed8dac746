pub mod pagination;
pub mod search_params;
pub mod truck;

use common::models::{FoodTruckPage, FoodTruckStatus};
use common::Result;
use serde::Serialize;
use tera::{Context, Tera};

pub use pagination::{PageSelection, PaginationView};
pub use search_params::SearchParams;
pub use truck::TruckView;

const TITLE: &str = "SF Food Trucks Finder";
const DESCRIPTION: &str = "Find food trucks in San Francisco";
const SUBHEADLINE: &str =
    "Discover delicious food trucks around San Francisco. Search by vendor name or street location.";

pub const SKELETON_COUNT: usize = 10;

const TEMPLATES: [(&str, &str); 8] = [
    ("shell.html", include_str!("../../templates/shell.html")),
    ("filters.html", include_str!("../../templates/filters.html")),
    ("skeleton.html", include_str!("../../templates/skeleton.html")),
    ("results.html", include_str!("../../templates/results.html")),
    ("pagination.html", include_str!("../../templates/pagination.html")),
    ("empty.html", include_str!("../../templates/empty.html")),
    ("failure.html", include_str!("../../templates/failure.html")),
    ("closing.html", include_str!("../../templates/closing.html")),
];

// Escapes `&<>"'` only; `/` stays literal inside hrefs.
fn escape_html(input: &str) -> String {
    html_escape::encode_quoted_attribute(input).into_owned()
}

/// Holds the compiled templates. Built once at startup and shared.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        tera.set_escape_fn(escape_html);
        Ok(Self { tera })
    }

    /// Everything up to and including the loading skeleton.
    pub fn shell(&self, view: &ShellView) -> Result<String> {
        self.render("shell.html", view)
    }

    /// The list, pagination and closing tags; hides the skeleton.
    pub fn results(&self, view: &ResultsView) -> Result<String> {
        self.render("results.html", view)
    }

    /// Rendered in place of the results when the fetch fails.
    pub fn failure(&self) -> Result<String> {
        Ok(self.tera.render("failure.html", &Context::new())?)
    }

    fn render<T: Serialize>(&self, template: &str, view: &T) -> Result<String> {
        let context = Context::from_serialize(view)?;
        Ok(self.tera.render(template, &context)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FiltersView {
    pub query: String,
    pub options: Vec<StatusOption>,
}

impl FiltersView {
    pub fn new(params: &SearchParams) -> Self {
        let current = params.status().param();
        let option = |value: &'static str, label: &'static str| StatusOption {
            value,
            label,
            selected: value == current,
        };

        let options = std::iter::once(option("all", "All"))
            .chain(
                FoodTruckStatus::ALL
                    .iter()
                    .map(|status| option(status.param(), status.label())),
            )
            .collect();

        Self {
            query: params.query().unwrap_or_default().to_string(),
            options,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShellView {
    pub title: &'static str,
    pub description: &'static str,
    pub subheadline: &'static str,
    pub filters: FiltersView,
    pub skeleton_count: usize,
}

impl ShellView {
    pub fn new(params: &SearchParams) -> Self {
        Self {
            title: TITLE,
            description: DESCRIPTION,
            subheadline: SUBHEADLINE,
            filters: FiltersView::new(params),
            skeleton_count: SKELETON_COUNT,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsView {
    pub trucks: Vec<TruckView>,
    pub pagination: PaginationView,
    pub empty: bool,
}

impl ResultsView {
    pub fn new(page: &FoodTruckPage, params: &SearchParams) -> Self {
        let selection = PageSelection::new(params.raw_page(), page.total);

        Self {
            trucks: page.food_trucks.iter().map(TruckView::from).collect(),
            pagination: selection.view(params),
            empty: page.total == 0,
        }
    }
}
