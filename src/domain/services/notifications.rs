use crate::domain::models::booking::Booking;

const VENUE_NAME: &str = "Annapurneshwari Temple Marriage Hall";
const ADDRESS_PREVIEW_LEN: usize = 50;

/// Message sent to the temple admin when a new booking lands.
pub fn admin_booking_alert(booking: &Booking) -> String {
    let address_preview: String = booking.address.chars().take(ADDRESS_PREVIEW_LEN).collect();

    format!(
        "New Hall Booking Alert!\n\
         Ref: {}\n\
         Customer: {}\n\
         Event: {}\n\
         Date: {}\n\
         Guests: {}\n\
         Contact: {}\n\
         Address: {}...",
        booking.booking_reference,
        booking.customer_name,
        booking.function_type,
        booking.event_date.format("%d/%m/%Y"),
        booking.guest_count,
        booking.mobile_number,
        address_preview,
    )
}

/// Message sent to the customer when their booking is confirmed.
pub fn customer_confirmation(booking: &Booking, admin_phone: &str) -> String {
    format!(
        "Booking Confirmed!\n\
         Ref: {}\n\
         Event: {}\n\
         Date: {}\n\
         Time: {}\n\
         Venue: {}\n\
         Contact: {}",
        booking.booking_reference,
        booking.function_type,
        booking.event_date.format("%d/%m/%Y"),
        booking.event_time.as_deref().unwrap_or("-"),
        VENUE_NAME,
        admin_phone,
    )
}
