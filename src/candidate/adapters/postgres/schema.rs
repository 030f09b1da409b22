//! Diesel schema for candidate persistence and source-message projection.

diesel::table! {
    /// Extracted task candidates awaiting triage.
    task_candidates (id) {
        /// Internal candidate identifier.
        id -> Uuid,
        /// Owning user.
        owner_id -> Uuid,
        /// Source message the candidate was derived from.
        source_message_id -> Uuid,
        /// Candidate category.
        #[sql_name = "type"]
        #[max_length = 20]
        kind -> Varchar,
        /// Candidate title.
        title -> Text,
        /// Optional course module label.
        module -> Nullable<Text>,
        /// Optional due timestamp.
        due_date -> Nullable<Timestamptz>,
        /// Optional location.
        location -> Nullable<Text>,
        /// Confidence band.
        #[max_length = 10]
        confidence -> Varchar,
        /// Optional numeric confidence score.
        confidence_score -> Nullable<Float8>,
        /// Opaque extraction rationale payload.
        extraction_reasons -> Jsonb,
        /// Optional extracted links.
        links -> Nullable<Jsonb>,
        /// Optional attachment payload.
        attachments -> Nullable<Jsonb>,
        /// Triage status.
        #[max_length = 50]
        status -> Varchar,
        /// Optional conversation thread back-reference.
        #[max_length = 255]
        thread_id -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Read-only projection of ingested source messages.
    source_messages (id) {
        /// Source message identifier.
        id -> Uuid,
        /// Message subject line.
        subject -> Text,
        /// Optional sender display name.
        from_name -> Nullable<Text>,
        /// Sender address.
        from_email -> Text,
        /// Time the message was received.
        received_at -> Timestamptz,
        /// Leading excerpt of the message body.
        body_snippet -> Text,
        /// URLs extracted from the message body.
        urls -> Jsonb,
    }
}
