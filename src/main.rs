//! Console host for the document controller.
//!
//! Reads one command per line from stdin and prints what a window would show.
//! Type `help` for the command list.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use labelview::data::Bitmap;
use labelview::{
    AppConfig, Axis, DiscardChoice, DocumentController, Event, Outcome, Point, RenderSink,
    ScrollSurface, Shell, Size,
};

const HELP: &str = "\
commands:
  open [PATH]          open PATH, or the last file when omitted
  dialog               pick a file to open
  recent [N]           list recent files, or open entry N
  save                 write the label file
  modified             flag unsaved changes
  zoom PERCENT         set the zoom
  in | out | original  zoom one step in, out, or to 100%
  fit-window on|off    toggle fit to window
  fit-width on|off     toggle fit to width
  size W H             resize the viewport
  wheel DELTA X Y      zoom around (X, Y)
  scroll DELTA [h]     scroll vertically (or horizontally with h)
  quit                 close";

/// Prints everything a window would display.
struct ConsoleFrontend {
    offsets: HashMap<Axis, f64>,
}

impl ConsoleFrontend {
    fn new() -> Self {
        Self {
            offsets: HashMap::new(),
        }
    }
}

/// Print `message` and read one trimmed line. `None` on end of input.
fn prompt(message: &str) -> Option<String> {
    print!("{}", message);
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

impl RenderSink for ConsoleFrontend {
    fn set_scale(&mut self, percent: i32) {
        println!("zoom: {}%", percent);
    }

    fn set_image(&mut self, image: &Bitmap) {
        println!("image: {}x{}", image.width(), image.height());
    }

    fn repaint(&mut self) {}

    fn clear(&mut self) {
        println!("image: none");
    }
}

impl ScrollSurface for ConsoleFrontend {
    fn offset(&self, axis: Axis) -> f64 {
        self.offsets.get(&axis).copied().unwrap_or(0.0)
    }

    fn set_offset(&mut self, axis: Axis, value: f64) {
        self.offsets.insert(axis, value);
        println!("scroll {:?}: {}", axis, value);
    }

    fn single_step(&self, _axis: Axis) -> f64 {
        1.0
    }
}

impl Shell for ConsoleFrontend {
    fn confirm_discard(&mut self, filename: &str) -> DiscardChoice {
        let question = format!(
            "Save annotations to \"{}\" before closing? [s]ave/[d]iscard/[c]ancel: ",
            filename
        );
        loop {
            match prompt(&question).as_deref() {
                Some("s") | Some("save") => return DiscardChoice::Save,
                Some("d") | Some("discard") => return DiscardChoice::Discard,
                Some("c") | Some("cancel") | None => return DiscardChoice::Cancel,
                Some(_) => continue,
            }
        }
    }

    fn choose_file(&mut self, start_dir: &Path, filter: &str) -> Option<PathBuf> {
        println!("{}", filter);
        let answer = prompt(&format!("open [{}]: ", start_dir.display()))?;
        if answer.is_empty() {
            return None;
        }
        Some(start_dir.join(answer))
    }

    fn report_error(&mut self, title: &str, message: &str) {
        eprintln!("{}: {}", title, message);
    }

    fn show_status(&mut self, message: &str) {
        println!("-- {}", message);
    }

    fn set_title(&mut self, title: &str) {
        println!("[{}]", title);
    }

    fn set_actions_enabled(&mut self, _enabled: bool) {}
}

/// Parse a command line into an event. `Err` carries a usage message.
fn parse_command(line: &str, controller: &DocumentController) -> Result<Option<Event>, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let number = |index: usize| -> Result<f64, String> {
        args.get(index)
            .ok_or_else(|| format!("{}: missing argument", command))?
            .parse::<f64>()
            .map_err(|e| format!("{}: {}", command, e))
    };
    let toggle = || match args.first().copied() {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        _ => Err(format!("{}: expected on or off", command)),
    };

    let event = match command {
        "open" => Event::Open(args.first().map(PathBuf::from)),
        "dialog" => Event::OpenDialog,
        "recent" => {
            let menu = controller.recent_menu();
            match args.first() {
                Some(n) => {
                    let index: usize = n.parse().map_err(|e| format!("recent: {}", e))?;
                    let path = menu
                        .get(index.wrapping_sub(1))
                        .ok_or_else(|| format!("recent: no entry {}", index))?;
                    Event::OpenRecent(path.clone())
                }
                None => {
                    for (i, path) in menu.iter().enumerate() {
                        println!("{:>2}. {}", i + 1, path.display());
                    }
                    return Ok(None);
                }
            }
        }
        "save" => Event::Save,
        "modified" => Event::Modified,
        "zoom" => Event::SetZoom(number(0)?.round() as i32),
        "in" => Event::AddZoom(labelview::constants::ZOOM_IN_FACTOR),
        "out" => Event::AddZoom(labelview::constants::ZOOM_OUT_FACTOR),
        "original" => Event::ZoomOriginal,
        "fit-window" => Event::FitWindow(toggle()?),
        "fit-width" => Event::FitWidth(toggle()?),
        "size" => Event::Resized(Size::new(number(0)?, number(1)?)),
        "wheel" => Event::Wheel {
            delta: number(0)?,
            position: Point::new(number(1)?, number(2)?),
            axis: Axis::Vertical,
            zoom: true,
        },
        "scroll" => Event::Wheel {
            delta: number(0)?,
            position: Point::default(),
            axis: if args.get(1) == Some(&"h") {
                Axis::Horizontal
            } else {
                Axis::Vertical
            },
            zoom: false,
        },
        "quit" | "exit" => Event::Close,
        "help" => {
            println!("{}", HELP);
            return Ok(None);
        }
        other => return Err(format!("unknown command {:?}, try help", other)),
    };
    Ok(Some(event))
}

fn main() {
    let mut config = AppConfig::load_from_default_path().unwrap_or_default();

    let level = config.preferences.log_level.to_level_filter().to_string();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut controller = DocumentController::new(&config);
    let mut ui = ConsoleFrontend::new();
    controller.start(&mut ui);
    controller.handle(Event::Resized(Size::new(1024.0, 768.0)), &mut ui);

    if let Some(path) = std::env::args_os().nth(1) {
        controller.handle(Event::Open(Some(PathBuf::from(path))), &mut ui);
    }

    loop {
        let Some(line) = prompt("> ") else {
            // No one left to answer the unsaved-changes prompt
            if controller.session().is_dirty() {
                log::warn!("Input closed with unsaved changes");
            }
            break;
        };

        match parse_command(&line, &controller) {
            Ok(Some(event)) => {
                if controller.handle(event, &mut ui) == Outcome::Quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(message) => eprintln!("{}", message),
        }
    }

    controller.store_into(&mut config);
    if let Err(e) = config.save_to_default_path() {
        log::warn!("Failed to save configuration: {}", e);
    }
}
