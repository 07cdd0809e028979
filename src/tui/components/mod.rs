pub mod car_picker;
pub mod fare_panel;
pub mod input_box;
pub mod location_picker;
pub mod ride_details;
pub mod ride_list;
pub mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use ride_list::{RideEvent, RideListState};
