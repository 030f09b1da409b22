//! Diesel schema for profile persistence.

diesel::table! {
    /// App-local profiles keyed by identity-provider user id.
    user_profiles (id) {
        /// Provider user id.
        id -> Uuid,
        /// Account email.
        email -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
