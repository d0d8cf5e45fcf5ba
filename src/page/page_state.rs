use crate::config::FlashConfig;
use crate::nav;
use crate::notification::{FlashTask, NotificationManager};
use crate::scheduler::Scheduler;
use crate::surface::RenderSurface;

pub struct Page<S, C> {
    pub flash: NotificationManager<S, C>,
    ready: bool,
}

impl<S, C> Page<S, C>
where
    S: RenderSurface,
    C: Scheduler<FlashTask>,
{
    pub fn new(surface: S, scheduler: C, config: FlashConfig) -> Self {
        Self {
            flash: NotificationManager::new(surface, scheduler, config),
            ready: false,
        }
    }

    /// Document-ready hook: adopt server-rendered banners and sync the
    /// navigation toggles. Safe to call more than once.
    pub fn ready(&mut self) -> usize {
        let adopted = self.flash.adopt_existing();
        nav::init(self.flash.surface_mut());

        #[cfg(debug_assertions)]
        {
            if self.ready {
                log::debug!("Page ready hook ran again");
            }
        }

        self.ready = true;
        adopted
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn surface(&self) -> &S {
        self.flash.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.flash.surface_mut()
    }
}
