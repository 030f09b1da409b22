//! Diesel schema for task persistence.

diesel::table! {
    /// User-owned task records confirmed from candidates.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Confirming candidate back-reference.
        candidate_id -> Uuid,
        /// Owning user.
        owner_id -> Uuid,
        /// Optional conversation thread back-reference.
        #[max_length = 255]
        thread_id -> Nullable<Varchar>,
        /// Task title.
        title -> Text,
        /// Task category.
        #[sql_name = "type"]
        #[max_length = 20]
        kind -> Varchar,
        /// Optional course module label.
        module -> Nullable<Text>,
        /// Optional due timestamp.
        due_date -> Nullable<Timestamptz>,
        /// Optional free-form notes.
        notes -> Nullable<Text>,
        /// Optional reference links.
        links -> Nullable<Jsonb>,
        /// Task lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Completion timestamp, set while the status is completed.
        completed_at -> Nullable<Timestamptz>,
    }
}
