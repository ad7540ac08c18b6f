//! Test Helpers

use smallvec::smallvec;

use crate::{
    domain::{
        products::{
            data::NewProduct,
            records::{Category, ProductUuid, Specifications},
        },
        shopping_items::{
            data::NewShoppingItem,
            records::{ShoppingCategory, ShoppingItemUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{Role, UserUuid},
        },
    },
    test::TestContext,
};

/// A valid skincare product with the given price and stock.
pub(crate) fn new_product(uuid: ProductUuid, price: u64, stock: u32) -> NewProduct {
    NewProduct {
        uuid,
        name: "Hydrating Cream".to_string(),
        description: "A rich moisturiser for dry skin.".to_string(),
        brand: "Glow Labs".to_string(),
        price,
        original_price: None,
        category: Category::Skincare,
        subcategory: "moisturisers".to_string(),
        main_image: "https://cdn.example.com/cream.jpg".to_string(),
        images: Vec::new(),
        stock,
        is_featured: false,
        is_on_sale: false,
        tags: smallvec!["hydrating".to_string()],
        specifications: Specifications::default(),
        created_by: None,
    }
}

/// A valid shopping item authored by `created_by`.
pub(crate) fn new_shopping_item(
    uuid: ShoppingItemUuid,
    created_by: UserUuid,
    category: ShoppingCategory,
    price: u64,
) -> NewShoppingItem {
    NewShoppingItem {
        uuid,
        name: format!("Everyday {category}"),
        category,
        price,
        description: "Soft cotton, relaxed fit.".to_string(),
        long_description: None,
        image: "https://cdn.example.com/item.jpg".to_string(),
        materials: vec!["cotton".to_string()],
        tags: Vec::new(),
        is_popular: false,
        created_by,
    }
}

/// Register a customer with a unique email.
pub(crate) async fn create_customer(ctx: &TestContext) -> Result<UserUuid, UsersServiceError> {
    create_user_with_role(ctx, Role::Customer).await
}

/// Register a user with a unique email and the given role.
pub(crate) async fn create_user_with_role(
    ctx: &TestContext,
    role: Role,
) -> Result<UserUuid, UsersServiceError> {
    let uuid = UserUuid::new();

    ctx.users
        .create_user(NewUser {
            uuid,
            name: format!("Test {role}"),
            email: format!("{}@example.com", uuid.into_uuid().simple()),
            role,
        })
        .await
        .map(|user| user.uuid)
}
