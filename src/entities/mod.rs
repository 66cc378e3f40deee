//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod banner;
pub mod blog_post;
pub mod category;
pub mod deal;
pub mod expense;
pub mod expense_category;
pub mod expense_subcategory;
pub mod menu;
pub mod product;
pub mod product_attribute;
pub mod product_image;
pub mod product_specification;
pub mod session;
pub mod supplier;
pub mod user;
pub mod variant;

// Re-export specific types to avoid conflicts
pub use banner::{Column as BannerColumn, Entity as Banner, Model as BannerModel};
pub use blog_post::{Column as BlogPostColumn, Entity as BlogPost, Model as BlogPostModel};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use deal::{Column as DealColumn, Entity as Deal, Model as DealModel};
pub use expense::{
    Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel, PaymentMethod,
};
pub use expense_category::{
    Column as ExpenseCategoryColumn, Entity as ExpenseCategory, Model as ExpenseCategoryModel,
};
pub use expense_subcategory::{
    Column as ExpenseSubcategoryColumn, Entity as ExpenseSubcategory,
    Model as ExpenseSubcategoryModel,
};
pub use menu::{Column as MenuColumn, Entity as Menu, Model as MenuModel};
pub use product::{
    Column as ProductColumn, Entity as Product, Model as ProductModel, ProductBadge,
};
pub use product_attribute::{
    Column as ProductAttributeColumn, Entity as ProductAttribute, Model as ProductAttributeModel,
};
pub use product_image::{
    Column as ProductImageColumn, Entity as ProductImage, Model as ProductImageModel,
};
pub use product_specification::{
    Column as ProductSpecificationColumn, Entity as ProductSpecification,
    Model as ProductSpecificationModel,
};
pub use session::{Column as SessionColumn, Entity as Session, Model as SessionModel};
pub use supplier::{Column as SupplierColumn, Entity as Supplier, Model as SupplierModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
pub use variant::{Column as VariantColumn, Entity as Variant, Model as VariantModel};
