use rondel_menu::IconName;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    Toggle,
    ConfigReload,
    IconResolved(IconName),
}
