//! App Router

use salvo::Router;

use crate::{auth, carts, products, shopping};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("cart")
                .hoop(auth::middleware::handler)
                .get(carts::get::handler)
                .push(Router::with_path("summary").get(carts::summary::handler))
                .push(Router::with_path("add").post(carts::add::handler))
                .push(Router::with_path("update").put(carts::update::handler))
                .push(Router::with_path("remove/{product_id}").delete(carts::remove::handler))
                .push(Router::with_path("clear").delete(carts::clear::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("search").get(products::search::handler))
                .push(Router::with_path("featured").get(products::featured::handler))
                .push(Router::with_path("category/{category}").get(products::category::handler))
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("products")
                .hoop(auth::middleware::handler)
                .hoop(auth::admin::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("shopping")
                .get(shopping::index::handler)
                .push(Router::with_path("categories").get(shopping::categories::handler))
                .push(Router::with_path("{item}").get(shopping::get::handler)),
        )
        .push(
            Router::with_path("shopping")
                .hoop(auth::middleware::handler)
                .hoop(auth::admin::handler)
                .post(shopping::create::handler)
                .push(
                    Router::with_path("{item}")
                        .put(shopping::update::handler)
                        .delete(shopping::delete::handler),
                ),
        )
        .push(
            Router::with_path("shopping/{item}/availability")
                .hoop(auth::middleware::handler)
                .hoop(auth::staff::handler)
                .patch(shopping::availability::handler),
        )
}
