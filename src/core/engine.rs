use crate::domain::model::Outcome;
use crate::domain::ports::{PlanDescription, Tool};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ToolboxEngine<T: Tool> {
    tool: T,
    monitor: SystemMonitor,
    dry_run: bool,
}

impl<T: Tool> ToolboxEngine<T> {
    pub fn new(tool: T) -> Self {
        Self::new_with_monitoring(tool, false)
    }

    pub fn new_with_monitoring(tool: T, monitor_enabled: bool) -> Self {
        Self {
            tool,
            monitor: SystemMonitor::new(monitor_enabled),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self) -> Result<Outcome> {
        let name = self.tool.name();
        tracing::info!("Starting {}", name);
        self.monitor.log_stats("Start");

        // Plan
        let plan = self.tool.plan().await?;
        tracing::info!("Planned {} item(s) for {}", plan.item_count(), name);
        self.monitor.log_stats("Plan");

        if self.dry_run {
            tracing::info!("🔍 DRY RUN MODE - no files will be changed");
            return Ok(Outcome::dry_run(name, plan.describe()));
        }

        // Apply
        let outcome = self.tool.apply(plan).await?;
        tracing::info!("Finished {}", name);
        self.monitor.log_stats("Apply");
        self.monitor.log_final_stats();

        Ok(outcome)
    }
}
