//! Console presentation of task events
//!
//! The only place task events become text. Polling tasks emit structured
//! [`TaskEvent`]s over a channel; this consumer maps service ids back to
//! display names and prints one colored line per event.

use std::collections::HashMap;

use colored::Colorize;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use surge_core::domain::event::{EventLevel, TaskEvent};
use surge_core::domain::task::TaskDescriptor;
use surge_core::dto::catalog::CatalogService;

/// Renders task events on the console
pub struct Presenter {
    names: HashMap<u32, String>,
}

impl Presenter {
    /// Creates a presenter knowing the display names of the given tasks
    pub fn new(descriptors: &[TaskDescriptor]) -> Self {
        let names = descriptors
            .iter()
            .map(|d| (d.service_id, d.display_name.clone()))
            .collect();
        Self { names }
    }

    /// Renders one event as an uncolored line
    pub fn render(&self, event: &TaskEvent) -> String {
        match self.names.get(&event.service_id) {
            Some(name) => format!("{}: {}", name, event.message),
            None => format!("service {}: {}", event.service_id, event.message),
        }
    }

    fn report(&self, event: &TaskEvent) {
        let time = event.timestamp.format("%H:%M:%S");
        let line = self.render(event);

        match event.level {
            EventLevel::Info => println!("{} {} {}", time, "[ok]".green(), line),
            EventLevel::Warning => println!("{} {} {}", time, "[warn]".yellow(), line),
            EventLevel::Error => println!("{} {} {}", time, "[error]".red(), line),
        }
    }

    /// Consumes events until every sender is gone
    pub fn spawn(self, mut events: UnboundedReceiver<TaskEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                self.report(&event);
            }
        })
    }
}

/// Prints the startup listing of available services
pub fn print_service_listing(services: &[CatalogService], descriptors: &[TaskDescriptor]) {
    println!("{}", "Available services:".cyan());

    for (position, descriptor) in descriptors.iter().enumerate() {
        let entry = services.iter().find(|s| s.id == descriptor.service_id);

        let rate = entry
            .and_then(|s| s.description.as_deref())
            .map(str::trim)
            .filter(|rate| !rate.is_empty())
            .map(|rate| format!("[{rate}] "))
            .unwrap_or_default();

        let timer = entry
            .and_then(|s| s.timer.as_deref())
            .unwrap_or_default();

        println!(
            "{}. {} {} {}",
            position + 1,
            descriptor.display_name.bold(),
            "[active]".green(),
            format!("{rate}{timer}").cyan()
        );
    }
}
