pub mod cart;
pub mod line_item;
pub mod order;
pub mod payment;

pub use cart::{Cart, NewLineItem};
pub use line_item::LineItem;
pub use order::{Order, OrderStatus, OrderTimestamps, ServiceType};
pub use payment::PaymentSelection;
