table! {
    auth_user (id) {
        id -> Integer,
        username -> Text,
        email -> Text,
        first_name -> Text,
        last_name -> Text,
        is_active -> Bool,
        is_staff -> Bool,
        is_superuser -> Bool,
        date_joined -> Timestamp,
        last_login -> Nullable<Timestamp>,
    }
}

table! {
    recommender_postercache (id) {
        id -> Integer,
    }
}

table! {
    recommender_rating (id) {
        id -> Integer,
        user_id -> Integer,
        movie_id -> Integer,
        movie_title -> Text,
        rating -> Integer,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

joinable!(recommender_rating -> auth_user (user_id));

allow_tables_to_appear_in_same_query!(
    auth_user,
    recommender_postercache,
    recommender_rating,
);
