//! Route templates for span names and metric labels.

/// Label for paths that match no storefront route.
pub(super) const UNMATCHED_ROUTE: &str = "unmatched";

/// Path segments under `/products/` that are routes rather than ids.
const PRODUCT_ROUTES: [&str; 3] = ["search", "featured", "category"];

/// The route template serving `path`. Ids, category names and documentation
/// assets are replaced by their parameter names, and anything unrouted
/// collapses to [`UNMATCHED_ROUTE`], so the set of labels is fixed.
pub(super) fn route_template(path: &str) -> &'static str {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    match segments.as_slice() {
        [] => "/",
        ["healthcheck"] => "/healthcheck",
        ["metrics"] => "/metrics",
        ["api-doc", "openapi.json"] => "/api-doc/openapi.json",
        ["docs"] => "/docs",
        ["docs", ..] => "/docs/{**}",
        ["cart"] => "/cart",
        ["cart", "summary"] => "/cart/summary",
        ["cart", "add"] => "/cart/add",
        ["cart", "update"] => "/cart/update",
        ["cart", "clear"] => "/cart/clear",
        ["cart", "remove", _] => "/cart/remove/{product_id}",
        ["products"] => "/products",
        ["products", "search"] => "/products/search",
        ["products", "featured"] => "/products/featured",
        ["products", "category", _] => "/products/category/{category}",
        ["products", product] if !PRODUCT_ROUTES.contains(product) => "/products/{product}",
        ["shopping"] => "/shopping",
        ["shopping", "categories"] => "/shopping/categories",
        ["shopping", _] => "/shopping/{item}",
        ["shopping", _, "availability"] => "/shopping/{item}/availability",
        _ => UNMATCHED_ROUTE,
    }
}

/// OpenTelemetry HTTP server span name, `{method} {route}`.
pub(super) fn span_name(method: &str, route: &str) -> String {
    format!("{method} {route}")
}
