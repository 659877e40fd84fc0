mod api_error;
mod events;
