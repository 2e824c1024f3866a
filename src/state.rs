use crate::service::FileService;
use crate::store::HabitCollectionStore;

#[derive(Clone)]
pub struct AppState {
    pub store: HabitCollectionStore<FileService>,
}

impl AppState {
    pub fn new(store: HabitCollectionStore<FileService>) -> Self {
        Self { store }
    }
}
