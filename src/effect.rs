//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current conditions for `city`, exactly as submitted.
    /// `request_id` keys the task so overlapping fetches run side by side.
    FetchWeather { city: String, request_id: u64 },
}
