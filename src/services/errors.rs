use crate::data::repos::traits::stores::StoreError;

#[derive(Debug, PartialEq)]
pub enum OrderServiceError {
    /// No authenticated identity where one is required.
    Unauthenticated,
    /// Checkout with no line items.
    EmptyCart,
    /// Status update that is not strictly forward of the current status.
    InvalidTransition,
    OrderNotFound,
    /// The order header committed but the line items did not. The payload
    /// is the order number of the unreconciled header.
    PartialWrite(String),
    Store(StoreError),
}

impl std::error::Error for OrderServiceError {}

impl std::fmt::Display for OrderServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderServiceError::Unauthenticated => write!(f, "Please sign in to place an order"),
            OrderServiceError::EmptyCart => write!(f, "Cannot place an order with an empty cart"),
            OrderServiceError::InvalidTransition => write!(f, "Invalid status transition"),
            OrderServiceError::OrderNotFound => write!(f, "Order not found"),
            OrderServiceError::PartialWrite(number) => {
                write!(f, "Order {} was not fully recorded", number)
            }
            OrderServiceError::Store(e) => write!(f, "Order store failed: {}", e),
        }
    }
}

impl From<StoreError> for OrderServiceError {
    fn from(e: StoreError) -> Self {
        OrderServiceError::Store(e)
    }
}

#[derive(Debug, PartialEq)]
pub enum MenuServiceError {
    ItemNotFound,
    Store(StoreError),
}

impl std::error::Error for MenuServiceError {}

impl std::fmt::Display for MenuServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuServiceError::ItemNotFound => write!(f, "Menu item not found"),
            MenuServiceError::Store(e) => write!(f, "Menu store failed: {}", e),
        }
    }
}

impl From<StoreError> for MenuServiceError {
    fn from(e: StoreError) -> Self {
        MenuServiceError::Store(e)
    }
}

#[derive(Debug, PartialEq)]
pub enum RoleServiceError {
    /// The acting identity may not perform this change. Covers non-admin
    /// role mutation and any attempt to modify one's own role.
    Forbidden,
    /// A pending manager request is already outstanding for this identity.
    DuplicateRequest,
    RequestNotFound,
    Store(StoreError),
}

impl std::error::Error for RoleServiceError {}

impl std::fmt::Display for RoleServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleServiceError::Forbidden => write!(f, "Permission denied"),
            RoleServiceError::DuplicateRequest => {
                write!(f, "A manager request is already pending for this account")
            }
            RoleServiceError::RequestNotFound => write!(f, "Manager request not found"),
            RoleServiceError::Store(e) => write!(f, "Role store failed: {}", e),
        }
    }
}

impl From<StoreError> for RoleServiceError {
    fn from(e: StoreError) -> Self {
        RoleServiceError::Store(e)
    }
}

#[derive(Debug, PartialEq)]
pub enum PredictionError {
    /// HTTP 429 from the inference endpoint.
    RateLimited,
    /// HTTP 402 from the inference endpoint.
    QuotaExhausted,
    /// Any other transport or upstream failure.
    Upstream(String),
    /// The endpoint answered but the payload did not decode.
    InvalidResponse(String),
    Store(StoreError),
}

impl std::error::Error for PredictionError {}

impl std::fmt::Display for PredictionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictionError::RateLimited => {
                write!(f, "AI rate limit reached. Please try again later.")
            }
            PredictionError::QuotaExhausted => {
                write!(f, "AI credits exhausted. Please add funds.")
            }
            PredictionError::Upstream(e) => {
                write!(f, "Failed to generate AI predictions: {}", e)
            }
            PredictionError::InvalidResponse(e) => {
                write!(f, "AI prediction response was malformed: {}", e)
            }
            PredictionError::Store(e) => write!(f, "Order history unavailable: {}", e),
        }
    }
}

impl From<StoreError> for PredictionError {
    fn from(e: StoreError) -> Self {
        PredictionError::Store(e)
    }
}
