//! Request handlers.

mod care;
mod http;
mod websocket;

pub use care::{
    create_caregiver_reminder, create_patient_reminder, delete_caregiver_reminder,
    delete_patient_reminder, get_additional_info, get_current_location, get_patient_home,
    get_push_token, list_caregiver_reminders, list_patient_reminders, save_additional_info,
    save_caregiver_home, save_current_location, save_patient_home, store_push_token,
    update_caregiver_reminder, update_patient_reminder,
};
pub use http::{
    add_family_patient, add_family_user, create_family, create_room, get_family, get_room_detail,
    health_check, join_room, register_user,
};
pub use websocket::websocket_handler;
