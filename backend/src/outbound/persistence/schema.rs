//! Diesel table definitions mirroring `migrations/`.

diesel::table! {
    animals (id) {
        id -> Text,
        name -> Text,
        available -> Bool,
        revision -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
