//! Built-in element table.

use std::sync::LazyLock;

use crate::descriptor::ElementDescriptor;
use crate::payload::PayloadKind;

static BUILTIN: LazyLock<Vec<ElementDescriptor>> = LazyLock::new(|| {
    let detail = |name: &str| PayloadKind::Detail(name.to_string());

    vec![
        ElementDescriptor::new("my-button", "MyButton")
            .event("onMyFocus", "myFocus", PayloadKind::Void)
            .event("onMyBlur", "myBlur", PayloadKind::Void),
        ElementDescriptor::new("my-checkbox", "MyCheckbox")
            .event("onMyChange", "myChange", detail("CheckboxChangeEventDetail"))
            .event("onMyFocus", "myFocus", PayloadKind::Void)
            .event("onMyBlur", "myBlur", PayloadKind::Void),
        ElementDescriptor::new("my-component", "MyComponent")
            .event("onMyCustomEvent", "myCustomEvent", PayloadKind::Number),
        ElementDescriptor::new("my-input", "MyInput")
            .event("onMyInput", "myInput", PayloadKind::Keyboard)
            .event("onMyChange", "myChange", detail("InputChangeEventDetail"))
            .event("onMyBlur", "myBlur", PayloadKind::Void)
            .event("onMyFocus", "myFocus", PayloadKind::Void),
        ElementDescriptor::new("my-popover", "MyPopover")
            .event("onMyPopoverDidPresent", "myPopoverDidPresent", PayloadKind::Void)
            .event("onMyPopoverWillPresent", "myPopoverWillPresent", PayloadKind::Void)
            .event(
                "onMyPopoverWillDismiss",
                "myPopoverWillDismiss",
                detail("OverlayEventDetail"),
            )
            .event(
                "onMyPopoverDidDismiss",
                "myPopoverDidDismiss",
                detail("OverlayEventDetail"),
            ),
        ElementDescriptor::new("my-radio", "MyRadio")
            .event("onMyFocus", "myFocus", PayloadKind::Void)
            .event("onMyBlur", "myBlur", PayloadKind::Void)
            .event("onMySelect", "mySelect", PayloadKind::Void),
        ElementDescriptor::new("my-radio-group", "MyRadioGroup")
            .event("onMyChange", "myChange", detail("RadioGroupChangeEventDetail")),
        ElementDescriptor::new("my-range", "MyRange")
            .event("onMyChange", "myChange", detail("RangeChangeEventDetail"))
            .event("onMyFocus", "myFocus", PayloadKind::Void)
            .event("onMyBlur", "myBlur", PayloadKind::Void),
    ]
});

/// The component library's elements, in declaration order.
pub fn builtin() -> &'static [ElementDescriptor] {
    &BUILTIN
}

/// Look up a built-in element by tag.
pub fn find(tag: &str) -> Option<&'static ElementDescriptor> {
    BUILTIN.iter().find(|d| d.tag == tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_descriptor_is_valid() {
        assert_eq!(builtin().len(), 8);
        for descriptor in builtin() {
            descriptor.validate().unwrap();
        }
    }

    #[test]
    fn class_names_match_tags() {
        for descriptor in builtin() {
            assert_eq!(
                descriptor.class_name,
                crate::descriptor::to_pascal_case(&descriptor.tag)
            );
        }
    }

    #[test]
    fn finds_checkbox_change_event() {
        let checkbox = find("my-checkbox").unwrap();
        let binding = checkbox.binding_for_prop("onMyChange").unwrap();

        assert_eq!(binding.event, "myChange");
        assert_eq!(
            binding.payload.detail_type(),
            Some("CheckboxChangeEventDetail")
        );
        assert!(find("my-slider").is_none());
    }
}
