use inkpress::application::render::{
    OrderedListNumbering, RenderConfigError, RenderOptions, RenderRequest, RenderService,
    RenderTarget, configure_render_service, render_service,
};
use serial_test::serial;

#[test]
#[serial]
fn configured_options_apply_to_the_shared_service() {
    configure_render_service(RenderOptions {
        ordered_lists: OrderedListNumbering::Preserve,
        unique_anchors: true,
        ..RenderOptions::default()
    })
    .expect("first configuration succeeds");

    let second = configure_render_service(RenderOptions::default());
    assert!(matches!(second, Err(RenderConfigError::AlreadyConfigured)));

    let request = RenderRequest::new(
        RenderTarget::PageBody {
            slug: "about".to_string(),
        },
        "# Setup\n\n# Setup\n\n5. five",
    );
    let output = render_service().render(&request);

    assert_eq!(
        output.html,
        "<h1 id=\"setup\">Setup</h1>\n<h1 id=\"setup-2\">Setup</h1>\n<ul><li>5. five</li></ul>"
    );
}
