//! `card_viewer` binary: the interactive window, or a one-shot PNG snapshot.

use anyhow::Result;
use card_viewer::{app::App, config::Config, snapshot};
use clap::Parser;
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let config = Config::parse();
    log::debug!("Configuration: {:?}", config);

    if let Some(out) = &config.snapshot {
        return snapshot::run(&config, out);
    }

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Card Maker")
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
            .build(&event_loop)?,
    );

    let mut app = pollster::block_on(App::new(window.clone(), &config))?;

    event_loop.run(move |event, elwt| {
        // The card animates continuously, so never sleep between frames.
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => {
                // egui and the pointer tracker see everything first.
                if app.handle_event(&window, &event) {
                    return;
                }
                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::KeyboardInput { event, .. }
                        if event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
                    {
                        elwt.exit()
                    }
                    WindowEvent::RedrawRequested => draw_frame(&mut app, &window, elwt),
                    _ => {}
                }
            }
            Event::AboutToWait => window.request_redraw(),
            _ => {}
        }
    })?;

    Ok(())
}

fn draw_frame(app: &mut App, window: &winit::window::Window, elwt: &EventLoopWindowTarget<()>) {
    match app.render(window) {
        Ok(()) => {}
        // Surface went stale (resize, display change); rebuild and retry next frame.
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            app.resize(app.renderer.gfx.size);
        }
        Err(wgpu::SurfaceError::OutOfMemory) => {
            log::error!("GPU out of memory while drawing the card, closing the viewer");
            elwt.exit();
        }
        Err(e) => log::warn!("Skipped card frame: {:?}", e),
    }
}
