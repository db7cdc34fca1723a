//! Server-rendered storefront components.
//!
//! Plain HTML string builders: a paginated listing section, the product
//! card, and the add-to-cart form control. Rendering stays presentational;
//! all data decisions happen in `vitrine-core`.

use serde::Serialize;

use vitrine_core::models::{CartAction, CartLineInput, ProductCard, SelectedOption};
use vitrine_core::ports::Connection;
use vitrine_core::services::{effective_disabled, SubmissionStatus};

/// Option name/value of a product that only has its default variant.
const DEFAULT_OPTION_NAME: &str = "Title";
const DEFAULT_OPTION_VALUE: &str = "Default Title";

// =============================================================================
// HTML helpers
// =============================================================================

/// Escape text for use in HTML bodies and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Image loading hint for a listing item.
///
/// Items of the first page fold load eagerly, the rest lazily.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLoading {
    Eager,
    Lazy,
}

impl ImageLoading {
    /// Hint for the item at `index` in a listing paged by `page_by`.
    pub fn for_index(index: usize, page_by: usize) -> Self {
        if index < page_by {
            Self::Eager
        } else {
            Self::Lazy
        }
    }

    /// Value of the HTML `loading` attribute.
    pub fn as_attr(self) -> &'static str {
        match self {
            Self::Eager => "eager",
            Self::Lazy => "lazy",
        }
    }
}

// =============================================================================
// Links
// =============================================================================

/// Listing page link for a pagination cursor.
fn page_link(direction: Option<&str>, cursor: &str) -> String {
    let mut qs = url::form_urlencoded::Serializer::new(String::new());
    if let Some(direction) = direction {
        qs.append_pair("direction", direction);
    }
    qs.append_pair("cursor", cursor);
    format!("/products?{}", qs.finish())
}

/// Product detail URL for a specific variant.
///
/// Selected options become query parameters, except for the platform's
/// default placeholder variant which carries no real options.
pub fn variant_url(handle: &str, selected_options: &[SelectedOption]) -> String {
    let meaningful: Vec<_> = selected_options
        .iter()
        .filter(|o| !(o.name == DEFAULT_OPTION_NAME && o.value == DEFAULT_OPTION_VALUE))
        .collect();

    if meaningful.is_empty() {
        return format!("/products/{}", handle);
    }

    let mut qs = url::form_urlencoded::Serializer::new(String::new());
    for option in meaningful {
        qs.append_pair(&option.name, &option.value);
    }
    format!("/products/{}?{}", handle, qs.finish())
}

// =============================================================================
// Paginated section
// =============================================================================

/// Render a connection as a grid with previous/next navigation.
///
/// Calls `render(node, index)` for every node, in server order; the
/// index drives the eager/lazy image hint of the caller's renderer.
pub fn paginated_resource_section<T>(
    connection: &Connection<T>,
    mut render: impl FnMut(&T, usize) -> String,
) -> String {
    let mut html = String::new();

    if connection.page_info.has_previous_page {
        if let Some(cursor) = &connection.page_info.start_cursor {
            html.push_str(&format!(
                r#"<a class="page-prev" href="{}">&larr; Previous</a>"#,
                page_link(Some("previous"), cursor)
            ));
        }
    }

    html.push_str(r#"<div class="products-grid">"#);
    for (index, node) in connection.nodes.iter().enumerate() {
        html.push_str(&render(node, index));
    }
    html.push_str("</div>");

    if connection.page_info.has_next_page {
        if let Some(cursor) = &connection.page_info.end_cursor {
            html.push_str(&format!(
                r#"<a class="page-next" href="{}">Next &rarr;</a>"#,
                page_link(None, cursor)
            ));
        }
    }

    html
}

// =============================================================================
// Product card
// =============================================================================

/// Render one product card.
///
/// A product without a featured image renders without an `<img>` tag;
/// the rest of the card is unaffected.
pub fn product_item(product: &ProductCard, loading: ImageLoading) -> String {
    let href = variant_url(&product.handle, &product.first_variant.selected_options);

    let mut html = format!(
        r#"<a class="product-item" href="{}">"#,
        escape_html(&href)
    );

    if let Some(image) = &product.featured_image {
        let alt = image.alt_text.as_deref().unwrap_or(&product.title);
        html.push_str(&format!(
            r#"<img src="{}" alt="{}" loading="{}">"#,
            escape_html(&image.url),
            escape_html(alt),
            loading.as_attr()
        ));
    }

    html.push_str(&format!(
        "<h4>{}</h4><small>{}</small></a>",
        escape_html(&product.title),
        escape_html(&product.price_range.min_variant_price.to_string())
    ));

    html
}

// =============================================================================
// Add-to-cart control
// =============================================================================

/// Declarative add-to-cart form control.
///
/// Renders a form bound to the `/cart` lines-add action. The analytics
/// payload is serialized as JSON text into a hidden `analytics` field on
/// every submission; it is never interpreted here. The trigger's
/// effective disabled state follows the submission boundary status
/// unless `disabled` is set explicitly.
pub struct AddToCartButton {
    pub lines: Vec<CartLineInput>,
    pub analytics: Option<serde_json::Value>,
    pub disabled: Option<bool>,
    /// Inline handler fired on activation, before the submission starts.
    /// It is not awaited and does not gate the submission.
    pub on_click: Option<String>,
    pub label: String,
}

#[derive(Serialize)]
struct CartFormPayload<'a> {
    action: CartAction,
    inputs: CartFormInputs<'a>,
}

#[derive(Serialize)]
struct CartFormInputs<'a> {
    lines: &'a [CartLineInput],
}

impl AddToCartButton {
    pub fn new(lines: Vec<CartLineInput>, label: impl Into<String>) -> Self {
        Self {
            lines,
            analytics: None,
            disabled: None,
            on_click: None,
            label: label.into(),
        }
    }

    /// Render the control given the current submission status.
    pub fn render(&self, status: SubmissionStatus) -> String {
        let payload = CartFormPayload {
            action: CartAction::LinesAdd,
            inputs: CartFormInputs { lines: &self.lines },
        };
        // Plain structs with string keys; serialization cannot fail.
        let form_input = serde_json::to_string(&payload).unwrap_or_default();
        let analytics = serde_json::to_string(&self.analytics).unwrap_or_default();

        let mut html = String::from(r#"<form method="post" action="/cart">"#);
        html.push_str(&format!(
            r#"<input type="hidden" name="cartFormInput" value="{}">"#,
            escape_html(&form_input)
        ));
        html.push_str(&format!(
            r#"<input type="hidden" name="analytics" value="{}">"#,
            escape_html(&analytics)
        ));

        html.push_str(r#"<button type="submit" class="cart-btn""#);
        if let Some(on_click) = &self.on_click {
            html.push_str(&format!(r#" onclick="{}""#, escape_html(on_click)));
        }
        if effective_disabled(self.disabled, status) {
            html.push_str(" disabled");
        }
        html.push_str(&format!(">{}</button></form>", escape_html(&self.label)));

        html
    }
}

// =============================================================================
// Listing page
// =============================================================================

/// Render the full product listing page.
pub fn listing_page(products: &Connection<ProductCard>, page_by: usize) -> String {
    let section = paginated_resource_section(products, |product, index| {
        product_item(product, ImageLoading::for_index(index, page_by))
    });

    format!(
        concat!(
            "<!doctype html><html><head><meta charset=\"utf-8\">",
            "<title>Products</title></head>",
            "<body><h1>Products</h1>{}</body></html>"
        ),
        section
    )
}
