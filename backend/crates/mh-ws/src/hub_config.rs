/// Configuration for the hub's coordination loop
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Commands buffered ahead of the coordination loop before callers wait
    pub command_buffer_size: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            command_buffer_size: 1024,
        }
    }
}
