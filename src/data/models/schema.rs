diesel::table! {
    food_items (food_item_id) {
        food_item_id -> Integer,
        #[max_length = 100]
        name -> Varchar,
        description -> Nullable<Text>,
        price_cents -> Bigint,
        #[max_length = 255]
        image -> Nullable<Varchar>,
        #[max_length = 50]
        category -> Varchar,
        is_available -> Bool,
        preparation_minutes -> Integer,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    orders (order_id) {
        order_id -> Integer,
        #[max_length = 20]
        order_number -> Varchar,
        user_id -> Integer,
        #[max_length = 100]
        user_name -> Varchar,
        total_cents -> Bigint,
        #[max_length = 20]
        status -> Varchar,
        #[max_length = 50]
        payment_method -> Varchar,
        #[max_length = 20]
        payment_status -> Varchar,
        estimated_minutes -> Integer,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    order_items (order_item_id) {
        order_item_id -> Integer,
        order_id -> Integer,
        food_item_id -> Nullable<Integer>,
        #[max_length = 100]
        name -> Varchar,
        price_cents -> Bigint,
        quantity -> Integer,
        #[max_length = 255]
        image -> Nullable<Varchar>,
        created_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    users (user_id) {
        user_id -> Integer,
        #[max_length = 100]
        name -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        #[max_length = 255]
        password_hash -> Varchar,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    user_roles (user_id) {
        user_id -> Integer,
        #[max_length = 20]
        role -> Varchar,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    manager_requests (request_id) {
        request_id -> Integer,
        user_id -> Integer,
        #[max_length = 100]
        name -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        #[max_length = 20]
        status -> Varchar,
        reviewed_by -> Nullable<Integer>,
        reviewed_at -> Nullable<Timestamp>,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::joinable!(order_items -> orders (order_id));
diesel::joinable!(orders -> users (user_id));
diesel::joinable!(user_roles -> users (user_id));
diesel::joinable!(manager_requests -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    food_items,
    manager_requests,
    order_items,
    orders,
    user_roles,
    users,
);
