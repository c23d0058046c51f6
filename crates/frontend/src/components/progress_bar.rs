use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
    /// 0..=100
    pub percent: u8,
    #[prop_or_default]
    pub label: Option<AttrValue>,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let percent = props.percent.min(100);
    html! {
        <div class="space-y-1">
            if let Some(label) = &props.label {
                <div class="flex justify-between text-xs text-gray-500">
                    <span>{label}</span>
                    <span>{format!("{percent}%")}</span>
                </div>
            }
            <div class="w-full h-2 rounded-full bg-gray-100 overflow-hidden">
                <div class="h-2 bg-gray-900" style={format!("width: {percent}%")}></div>
            </div>
        </div>
    }
}
