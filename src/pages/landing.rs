use std::cell::RefCell;
use std::rc::Rc;

use coursemate_landing::browser::BrowserSession;
use coursemate_landing::{Direction, LandingPage};
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlFormElement, HtmlInputElement};
use yew::prelude::*;

type SessionSlot = Rc<RefCell<Option<BrowserSession>>>;

const FEATURES: &[(&str, &str, &str)] = &[
    ("📚", "Smart Notes", "Turn lecture recordings into searchable, structured notes."),
    ("🧠", "Spaced Review", "Flashcards scheduled right before you would forget them."),
    ("📅", "Study Planner", "A weekly plan built around your deadlines and classes."),
    ("🤝", "Study Groups", "Share notes and quiz each other in real time."),
    ("📝", "Exam Mode", "Timed practice exams generated from your own material."),
    ("📈", "Progress Insights", "See which topics need attention before the exam does."),
];

const NAV_LINKS: &[(&str, &str)] = &[
    ("features", "Features"),
    ("pricing", "Pricing"),
    ("testimonials", "Reviews"),
];

fn with_page(slot: &SessionSlot, f: impl FnOnce(&LandingPage)) {
    if let Some(session) = slot.borrow().as_ref() {
        f(session.page());
    }
}

fn page_callback<E: 'static>(slot: &SessionSlot, f: impl Fn(&LandingPage) + 'static) -> Callback<E> {
    let slot = slot.clone();
    Callback::from(move |_: E| with_page(&slot, &f))
}

fn input_value(id: &str) -> String {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

fn alert(message: &str) {
    if let Some(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let session: SessionSlot = use_mut_ref(|| None);

    {
        let session = session.clone();
        use_effect_with_deps(
            move |_| {
                match BrowserSession::mount() {
                    Ok(mounted) => *session.borrow_mut() = Some(mounted),
                    Err(err) => log::error!("failed to start landing page: {}", err),
                }
                move || {
                    // Dropping the session cancels its timers and listeners
                    session.borrow_mut().take();
                }
            },
            (),
        );
    }

    let toggle_menu = page_callback::<MouseEvent>(&session, |page| page.toggle_mobile_menu());
    let previous_feature =
        page_callback::<MouseEvent>(&session, |page| page.change_feature(Direction::Previous));
    let next_feature =
        page_callback::<MouseEvent>(&session, |page| page.change_feature(Direction::Next));
    let claim_offer = page_callback::<MouseEvent>(&session, |page| page.claim_offer());
    let watch_demo = page_callback::<MouseEvent>(&session, |page| page.watch_demo());
    let show_login = page_callback::<MouseEvent>(&session, |page| page.show_modal("login"));
    let show_signup = page_callback::<MouseEvent>(&session, |page| page.show_modal("signup"));

    let scroll_to = |section: &'static str| {
        page_callback::<MouseEvent>(&session, move |page| page.scroll_to_section(section))
    };
    let hide = |modal: &'static str| {
        page_callback::<MouseEvent>(&session, move |page| page.hide_modal(modal))
    };

    let on_login = {
        let session = session.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form: HtmlFormElement = e.target_unchecked_into();
            let email = input_value("login-email");
            with_page(&session, |page| alert(&page.submit_login(&email)));
            form.reset();
        })
    };

    let on_signup = {
        let session = session.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form: HtmlFormElement = e.target_unchecked_into();
            let name = input_value("signup-name");
            let email = input_value("signup-email");
            with_page(&session, |page| alert(&page.submit_signup(&name, &email)));
            form.reset();
        })
    };

    html! {
        <div class="landing-page">
            <nav class="top-nav">
                <div class="nav-content">
                    <span class="nav-logo" onclick={scroll_to("hero")}>{"🎓 CourseMate"}</span>
                    <div class="nav-links">
                        { for NAV_LINKS.iter().map(|(id, label)| html! {
                            <a class="nav-link" onclick={scroll_to(*id)}>{*label}</a>
                        }) }
                        <button class="nav-login-button" onclick={show_login.clone()}>{"Login"}</button>
                    </div>
                    <button id="mobile-menu-button" class="burger-menu" onclick={toggle_menu}>{"☰"}</button>
                </div>
                <div id="mobile-menu" class="mobile-menu hidden">
                    { for NAV_LINKS.iter().map(|(id, label)| html! {
                        <a class="nav-link" onclick={scroll_to(*id)}>{*label}</a>
                    }) }
                    <button class="nav-login-button" onclick={show_login}>{"Login"}</button>
                </div>
            </nav>

            <section id="hero" class="scroll-section hero-section">
                <h1>{"Study smarter, not longer."}</h1>
                <p>{"CourseMate turns every lecture into notes, flashcards and a plan you can actually follow."}</p>
                <div class="offer-banner">
                    <span>{"Launch offer ends in "}</span>
                    <span id="countdown-timer" class="countdown">{"23:59:59"}</span>
                </div>
                <div class="hero-actions">
                    <button class="cta-button" onclick={claim_offer.clone()}>{"Claim 50% off"}</button>
                    <button class="secondary-button" onclick={watch_demo}>{"▶ Watch demo"}</button>
                </div>
            </section>

            <section id="features" class="scroll-section features-section">
                <h2>{"Everything you need for the semester"}</h2>
                <div class="features-carousel">
                    <button class="carousel-arrow" onclick={previous_feature}>{"‹"}</button>
                    <div class="features-viewport">
                        <div id="features-wrapper" class="features-wrapper">
                            { for FEATURES.iter().enumerate().map(|(i, (icon, title, text))| html! {
                                <div id={format!("feature-card-{}", i)} class="feature-card">
                                    <div class="feature-icon">{*icon}</div>
                                    <h3>{*title}</h3>
                                    <p>{*text}</p>
                                </div>
                            }) }
                        </div>
                    </div>
                    <button class="carousel-arrow" onclick={next_feature}>{"›"}</button>
                </div>
                <div class="feature-dots">
                    { for (0..FEATURES.len()).map(|i| {
                        let session = session.clone();
                        let onclick = Callback::from(move |_: MouseEvent| {
                            with_page(&session, |page| {
                                if let Err(err) = page.set_feature(i) {
                                    log::warn!("{}", err);
                                }
                            });
                        });
                        html! { <span id={format!("feature-dot-{}", i)} class="feature-dot" {onclick}></span> }
                    }) }
                </div>
            </section>

            <section id="pricing" class="scroll-section pricing-section">
                <h2>{"Simple pricing"}</h2>
                <div class="pricing-card">
                    <h3>{"Student"}</h3>
                    <p class="price">{"$4.99/month"}</p>
                    <button class="cta-button" onclick={show_signup.clone()}>{"Start free trial"}</button>
                </div>
            </section>

            <section id="testimonials" class="scroll-section testimonials-section">
                <h2>{"Loved by students"}</h2>
                <blockquote>{"\"I finally stopped cramming the night before.\""}</blockquote>
                <blockquote>{"\"The flashcards alone got me through organic chemistry.\""}</blockquote>
            </section>

            <section id="cta" class="scroll-section cta-section">
                <h2>{"Ready for your best semester?"}</h2>
                <button class="cta-button" onclick={claim_offer}>{"Claim offer"}</button>
                <button class="secondary-button" onclick={show_signup}>{"Create account"}</button>
            </section>

            <div id="login-modal" class="modal hidden">
                <div class="modal-content">
                    <button class="modal-close" onclick={hide("login")}>{"✕"}</button>
                    <h2>{"Welcome back"}</h2>
                    <form onsubmit={on_login}>
                        <input id="login-email" name="email" type="email" placeholder="Email" required=true />
                        <input id="login-password" name="password" type="password" placeholder="Password" required=true />
                        <button type="submit" class="cta-button">{"Log in"}</button>
                    </form>
                </div>
            </div>

            <div id="signup-modal" class="modal hidden">
                <div class="modal-content">
                    <button class="modal-close" onclick={hide("signup")}>{"✕"}</button>
                    <h2>{"Start your free trial"}</h2>
                    <form onsubmit={on_signup}>
                        <input id="signup-name" name="name" type="text" placeholder="Name" required=true />
                        <input id="signup-email" name="email" type="email" placeholder="Email" required=true />
                        <input id="signup-password" name="password" type="password" placeholder="Password" required=true />
                        <button type="submit" class="cta-button">{"Create account"}</button>
                    </form>
                </div>
            </div>

            <div id="demo-modal" class="modal hidden">
                <div class="modal-content">
                    <button class="modal-close" onclick={hide("demo")}>{"✕"}</button>
                    <h2>{"CourseMate in 90 seconds"}</h2>
                    <div class="demo-video">{"🎬"}</div>
                </div>
            </div>
        </div>
    }
}
