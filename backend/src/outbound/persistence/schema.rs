//! Diesel table definitions. Keep in step with `migrations/`.

diesel::table! {
    /// Registered players; `unique_name` is the natural key.
    players (id) {
        id -> Int4,
        name -> Varchar,
        unique_name -> Varchar,
        /// Lowercase hex MD5 digest.
        password -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered games; `name` is the natural key.
    games (id) {
        id -> Int4,
        name -> Varchar,
        publisher -> Nullable<Varchar>,
        genre -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Levels, unique by `(game_id, name)`.
    levels (id) {
        id -> Int4,
        game_id -> Int4,
        name -> Varchar,
        /// `number` or `time`.
        score_type -> Varchar,
        /// `descending` or `ascending`.
        score_order -> Varchar,
    }
}

diesel::table! {
    /// Scores, unique by `(level_id, player_id)`.
    scores (id) {
        id -> Int4,
        level_id -> Int4,
        player_id -> Int4,
        value -> Int8,
        recorded_at -> Timestamp,
    }
}

diesel::joinable!(levels -> games (game_id));
diesel::joinable!(scores -> levels (level_id));
diesel::joinable!(scores -> players (player_id));

diesel::allow_tables_to_appear_in_same_query!(games, levels, players, scores);
