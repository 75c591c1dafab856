use std::sync::Arc;

use nutriclinic_core::application::NutriclinicService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: NutriclinicService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: NutriclinicService) -> Self {
        Self { args, service }
    }
}
