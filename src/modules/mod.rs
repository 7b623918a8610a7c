pub mod boards;

use corkboard_kernel::ModuleRegistry;

/// Register all application modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(boards::create_module());
}
