pub mod search_form;
pub mod weather_card;
pub mod weather_widget;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use search_form::{SearchForm, SearchFormProps};
pub use weather_card::{WeatherCard, WeatherCardProps};
pub use weather_widget::{WeatherWidget, WeatherWidgetProps};
