//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered trainers.
    trainers (id) {
        id -> Int8,
        /// Trimmed display name, at most 100 characters.
        name -> Varchar,
        /// Non-negative age.
        age -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Pokémon enriched from the catalog on creation.
    ///
    /// `lower(name)` carries a unique index, so names are unique ignoring case.
    pokemons (id) {
        id -> Int8,
        name -> Varchar,
        photo_url -> Nullable<Text>,
        height -> Nullable<Int4>,
        weight -> Nullable<Int4>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ownership pairs. Both foreign keys cascade on delete.
    trainer_pokemons (trainer_id, pokemon_id) {
        trainer_id -> Int8,
        pokemon_id -> Int8,
    }
}

diesel::joinable!(trainer_pokemons -> trainers (trainer_id));
diesel::joinable!(trainer_pokemons -> pokemons (pokemon_id));

diesel::allow_tables_to_appear_in_same_query!(trainers, pokemons, trainer_pokemons);
