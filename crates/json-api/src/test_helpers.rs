//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use smallvec::smallvec;
use uuid::Uuid;

use storefront_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        products::{
            MockProductsService,
            records::{
                Category, ProductRecord, ProductSummary, ProductUuid, Ratings, Specifications,
            },
        },
        shopping_items::{
            MockShoppingItemsService,
            records::{ShoppingCategory, ShoppingItemRecord, ShoppingItemUuid},
        },
        users::{
            MockUsersService,
            records::{Role, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

/// Hoop that authenticates every request as [`TEST_USER_UUID`] with a fixed
/// role.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InjectPrincipal(Principal);

#[salvo::handler]
impl InjectPrincipal {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_principal(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn inject_principal(role: Role) -> InjectPrincipal {
    InjectPrincipal(Principal {
        user_uuid: TEST_USER_UUID,
        role,
    })
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_item().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();
    carts.expect_summary().never();

    carts
}

fn strict_shopping_items_mock() -> MockShoppingItemsService {
    let mut items = MockShoppingItemsService::new();

    items.expect_list_items().never();
    items.expect_get_item().never();
    items.expect_create_item().never();
    items.expect_update_item().never();
    items.expect_toggle_availability().never();
    items.expect_delete_item().never();
    items.expect_categories().never();

    items
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_create_user().never();
    users.expect_get_user().never();
    users.expect_list_users().never();

    users
}

fn state(
    products: MockProductsService,
    carts: MockCartsService,
    shopping_items: MockShoppingItemsService,
    auth: MockAuthService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
        carts: Arc::new(carts),
        shopping_items: Arc::new(shopping_items),
        users: Arc::new(strict_users_mock()),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(
        strict_products_mock(),
        strict_carts_mock(),
        strict_shopping_items_mock(),
        auth,
    )
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    state(
        products,
        strict_carts_mock(),
        strict_shopping_items_mock(),
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_shopping_items(items: MockShoppingItemsService) -> Arc<State> {
    state(
        strict_products_mock(),
        strict_carts_mock(),
        items,
        strict_auth_mock(),
    )
}

/// Service for product handlers, with the caller authenticated as `role`.
pub(crate) fn products_service(products: MockProductsService, role: Role, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .hoop(inject_principal(role))
            .push(route),
    )
}

/// Service for shopping item handlers, with the caller authenticated as `role`.
pub(crate) fn shopping_items_service(
    items: MockShoppingItemsService,
    role: Role,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_shopping_items(items)))
            .hoop(inject_principal(role))
            .push(route),
    )
}

/// Service for cart handlers, with the caller authenticated as a customer.
pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(
                strict_products_mock(),
                carts,
                strict_shopping_items_mock(),
                strict_auth_mock(),
            )))
            .hoop(inject_principal(Role::Customer))
            .push(route),
    )
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Hydrating Cream".to_string(),
        description: "A rich moisturiser for dry skin.".to_string(),
        brand: "Glow".to_string(),
        price: 1_200,
        original_price: Some(1_500),
        category: Category::Skincare,
        subcategory: "Moisturisers".to_string(),
        main_image: "https://example.com/cream.jpg".to_string(),
        images: vec!["https://example.com/cream.jpg".to_string()],
        stock: 3,
        is_active: true,
        is_featured: false,
        is_on_sale: true,
        tags: smallvec!["hydrating".to_string()],
        specifications: Specifications {
            skin_types: vec!["dry".to_string()],
            ..Specifications::default()
        },
        ratings: Ratings {
            average: 4.5,
            count: 12,
        },
        created_by: Some(TEST_USER_UUID),
        updated_by: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_summary(uuid: ProductUuid, price: u64) -> ProductSummary {
    ProductSummary {
        uuid,
        name: "Hydrating Cream".to_string(),
        price,
        main_image: "https://example.com/cream.jpg".to_string(),
        stock: 5,
        is_active: true,
    }
}

pub(crate) fn make_shopping_item(uuid: ShoppingItemUuid) -> ShoppingItemRecord {
    ShoppingItemRecord {
        uuid,
        name: "Linen Shirt".to_string(),
        category: ShoppingCategory::Shirt,
        price: 3_200,
        description: "Breathable summer shirt".to_string(),
        long_description: None,
        image: "https://example.com/shirt.jpg".to_string(),
        materials: vec!["linen".to_string()],
        tags: Vec::new(),
        is_available: true,
        is_popular: false,
        created_by: Some(TEST_USER_UUID),
        updated_by: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
