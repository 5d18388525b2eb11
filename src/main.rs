use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

mod api;
mod models;
mod pages;
mod session;

use pages::cuentas::CuentasPage;
use pages::pagos::PagosPage;
use pages::sucursales::SucursalesPage;
use session::SessionUser;

#[derive(Clone, Copy, PartialEq)]
enum AuthStatus {
    Checking,
    Authenticated,
    Unauthenticated,
}

#[derive(Clone, Copy, PartialEq)]
enum Page {
    Pagos,
    Cuentas,
    Sucursales,
}

/// Per-page outcome banner: green on success, red on failure.
#[derive(Clone, PartialEq)]
pub(crate) struct Notice {
    pub ok: bool,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            ok: true,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            ok: false,
            text: text.into(),
        }
    }
}

pub(crate) fn notice_banner(notice: &Option<Notice>) -> Html {
    match notice {
        Some(n) if n.ok => html! {
            <div class="bg-green-50 border border-green-200 text-green-700 text-sm rounded-lg px-4 py-3">{ n.text.clone() }</div>
        },
        Some(n) => html! {
            <div class="bg-red-50 border border-red-200 text-red-700 text-sm rounded-lg px-4 py-3">{ n.text.clone() }</div>
        },
        None => html! {},
    }
}

pub(crate) fn page_shell(
    title: &'static str,
    subtitle: &'static str,
    actions: Html,
    children: Html,
) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <div>
                    <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                    <p class="text-sm text-muted-foreground">{ subtitle }</p>
                </div>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct PaginationProps {
    pub page: u32,
    pub total_pages: u32,
    pub disabled: bool,
    pub on_change: Callback<u32>,
}

#[function_component(PaginationControls)]
pub(crate) fn pagination_controls(props: &PaginationProps) -> Html {
    if props.total_pages <= 1 {
        return html! {};
    }

    let prev = {
        let on_change = props.on_change.clone();
        let page = props.page;
        Callback::from(move |_| {
            if page > 1 {
                on_change.emit(page - 1);
            }
        })
    };
    let next = {
        let on_change = props.on_change.clone();
        let page = props.page;
        let total_pages = props.total_pages;
        Callback::from(move |_| {
            if page < total_pages {
                on_change.emit(page + 1);
            }
        })
    };

    html! {
        <div class="flex items-center justify-center gap-3 mt-4">
            <button onclick={prev} disabled={props.disabled || props.page <= 1}
                class="px-3 py-1.5 text-sm rounded-lg border border-border text-foreground disabled:opacity-40">
                {"Anterior"}
            </button>
            <span class="text-sm text-muted-foreground">
                { format!("Página {} de {}", props.page, props.total_pages) }
            </span>
            <button onclick={next} disabled={props.disabled || props.page >= props.total_pages}
                class="px-3 py-1.5 text-sm rounded-lg border border-border text-foreground disabled:opacity-40">
                {"Siguiente"}
            </button>
        </div>
    }
}

struct NavItem {
    label: &'static str,
    page: Page,
    icon: fn() -> Html,
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let nav_items = vec![
        NavItem {
            label: "Pagos",
            page: Page::Pagos,
            icon: icon_credit_card,
        },
        NavItem {
            label: "Cuentas",
            page: Page::Cuentas,
            icon: icon_wallet,
        },
        NavItem {
            label: "Sucursales",
            page: Page::Sucursales,
            icon: icon_building,
        },
    ];

    let on_logout = Callback::from(move |_| {
        spawn_local(async move {
            session::sign_out().await;
        });
    });

    html! {
        <div class="w-[220px] h-screen bg-[#D8E1E8] p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <div class="w-12 h-12 bg-[#173E63] rounded-full flex items-center justify-center text-white font-black">
                    {"NF"}
                </div>
                <span class="text-[#173E63] text-xl font-black tracking-tight">{"NegoFinanzas"}</span>
            </div>

            <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { for nav_items.iter().map(|item| {
                        let is_active = item.page == props.active_page;
                        let class_name = if is_active {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                        };
                        let on_select = props.on_select.clone();
                        let page = item.page;

                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                                <span class="shrink-0">{ (item.icon)() }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>

                <div class="mt-auto pt-4">
                    <button onclick={on_logout} class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-white/10 transition-colors text-[13px] font-medium text-slate-300">
                        { icon_log_out() }
                        <span>{"Cerrar sesión"}</span>
                    </button>
                </div>
            </div>
        </div>
    }
}

#[function_component(Header)]
fn header() -> Html {
    let session_user = use_context::<UseStateHandle<Option<SessionUser>>>();
    let user = session_user.as_ref().and_then(|handle| (**handle).clone());

    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
            <div class="flex-1"></div>
            {
                if let Some(user) = user {
                    html! {
                        <div class="flex items-center gap-3">
                            <div class="text-right">
                                <p class="text-sm font-bold text-[#173E63]">{ user.full_name() }</p>
                                <p class="text-xs text-slate-500">{ user.email.clone() }</p>
                            </div>
                            <span class="bg-[#173E63] text-white px-3 py-1 rounded-full text-[10px] font-bold uppercase tracking-wider">
                                { user.role.clone() }
                            </span>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    let session_user = use_context::<UseStateHandle<Option<SessionUser>>>();

    // Second guard layer: if the session evaporated by the time the layout
    // mounted, bail out to the sign-in route with a hard navigation.
    {
        let has_session = session_user
            .as_ref()
            .map(|handle| handle.is_some())
            .unwrap_or(false);
        use_effect_with_deps(
            move |has_session| {
                if !has_session {
                    session::navigate_to_sign_in();
                }
                || ()
            },
            has_session,
        );
    }

    html! {
        <div class="flex h-screen bg-background">
            <div class="hidden md:flex">
                <Sidebar active_page={props.active_page} on_select={props.on_select.clone()} />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct AuthScreenProps {
    on_authenticated: Callback<SessionUser>,
}

#[function_component(AuthScreen)]
fn auth_screen(props: &AuthScreenProps) -> Html {
    let email = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_authenticated = props.on_authenticated.clone();

        Callback::from(move |_| {
            let email_val = email.trim().to_string();
            let password_val = (*password).clone();

            if email_val.is_empty() || password_val.is_empty() {
                error.set(Some("Ingresa tu correo y contraseña.".to_string()));
                return;
            }

            error.set(None);
            loading.set(true);

            let error = error.clone();
            let loading = loading.clone();
            let on_authenticated = on_authenticated.clone();
            spawn_local(async move {
                match session::login(&email_val, &password_val).await {
                    Ok(session) => {
                        on_authenticated.emit(session.user);
                    }
                    Err(_) => {
                        error.set(Some("Credenciales inválidas".to_string()));
                        loading.set(false);
                    }
                }
            });
        })
    };

    html! {
        <div class="min-h-screen bg-[#D8E1E8] flex items-center justify-center p-6">
            <div class="bg-white rounded-[24px] shadow-lg p-8 w-full max-w-md">
                <div class="mb-6">
                    <h1 class="text-2xl font-bold text-[#173E63]">{"Bienvenido"}</h1>
                    <p class="text-sm text-slate-500 mt-1">{"Inicia sesión para continuar."}</p>
                </div>

                <div class="space-y-4">
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-slate-500">{"Correo"}</label>
                        <input type="email" placeholder="correo@empresa.pe" value={(*email).clone()} oninput={{
                            let email = email.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                email.set(input.value());
                            })
                        }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none" />
                    </div>
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-slate-500">{"Contraseña"}</label>
                        <input type="password" placeholder="••••••••" value={(*password).clone()} oninput={{
                            let password = password.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                password.set(input.value());
                            })
                        }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none" />
                    </div>

                    {
                        if let Some(msg) = &*error {
                            html! { <p class="text-sm text-red-500">{ msg.clone() }</p> }
                        } else {
                            html! {}
                        }
                    }

                    <button onclick={on_submit} disabled={*loading}
                        class="w-full bg-[#173E63] text-white py-2.5 rounded-[10px] text-sm font-bold disabled:opacity-60">
                        { if *loading { "Ingresando..." } else { "Iniciar sesión" } }
                    </button>
                </div>
            </div>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let auth_status = use_state(|| AuthStatus::Checking);
    let session_user = use_state(|| None::<SessionUser>);
    let active_page = use_state(|| Page::Pagos);

    {
        let auth_status = auth_status.clone();
        let session_user = session_user.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match session::fetch_session().await {
                        Some(session) => {
                            session_user.set(Some(session.user));
                            auth_status.set(AuthStatus::Authenticated);
                        }
                        None => {
                            auth_status.set(AuthStatus::Unauthenticated);
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    if *auth_status == AuthStatus::Checking {
        return html! {
            <div class="min-h-screen bg-[#D8E1E8] flex items-center justify-center">
                <p class="text-sm text-slate-500">{"Cargando..."}</p>
            </div>
        };
    }

    if *auth_status == AuthStatus::Unauthenticated {
        let auth_status = auth_status.clone();
        let session_user_handle = session_user.clone();
        return html! {
            <AuthScreen on_authenticated={Callback::from(move |user| {
                session_user_handle.set(Some(user));
                auth_status.set(AuthStatus::Authenticated);
            })} />
        };
    }

    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |page| active_page.set(page))
    };

    html! {
        <ContextProvider<UseStateHandle<Option<SessionUser>>> context={session_user}>
            <Layout active_page={*active_page} on_select={on_select}>
                {
                    match *active_page {
                        Page::Pagos => html! { <PagosPage /> },
                        Page::Cuentas => html! { <CuentasPage /> },
                        Page::Sucursales => html! { <SucursalesPage /> },
                    }
                }
            </Layout>
        </ContextProvider<UseStateHandle<Option<SessionUser>>>>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path} />
        </svg>
    }
}

fn icon_small(path: &'static str) -> Html {
    html! {
        <svg width="14" height="14" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path} />
        </svg>
    }
}

fn icon_credit_card() -> Html {
    icon_base("M2 6h20v12H2zM2 10h20")
}
fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
fn icon_building() -> Html {
    icon_base("M3 21h18M5 21V5l7-3 7 3v16M9 9h1M9 13h1M14 9h1M14 13h1")
}
fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub(crate) fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub(crate) fn icon_search() -> Html {
    icon_small("M11 19a8 8 0 100-16 8 8 0 000 16zM21 21l-4.35-4.35")
}
pub(crate) fn icon_edit() -> Html {
    icon_small("M11 4H4a2 2 0 00-2 2v14a2 2 0 002 2h14a2 2 0 002-2v-7M18.5 2.5a2.12 2.12 0 013 3L12 15l-4 1 1-4z")
}
pub(crate) fn icon_trash() -> Html {
    icon_small("M3 6h18M8 6V4h8v2M19 6l-1 14H6L5 6M10 11v6M14 11v6")
}
pub(crate) fn icon_eye() -> Html {
    icon_small("M1 12s4-8 11-8 11 8 11 8-4 8-11 8-11-8-11-8zM12 15a3 3 0 100-6 3 3 0 000 6z")
}
pub(crate) fn icon_upload() -> Html {
    icon_small("M21 15v4a2 2 0 01-2 2H5a2 2 0 01-2-2v-4M17 8l-5-5-5 5M12 3v12")
}
pub(crate) fn icon_file() -> Html {
    icon_small("M14 2H6a2 2 0 00-2 2v16a2 2 0 002 2h12a2 2 0 002-2V8zM14 2v6h6")
}
pub(crate) fn icon_toggle() -> Html {
    icon_small("M16 6a6 6 0 010 12H8A6 6 0 018 6zM8 15a3 3 0 100-6 3 3 0 000 6z")
}
pub(crate) fn icon_status() -> Html {
    icon_small("M22 11.08V12a10 10 0 11-5.93-9.14M22 4L12 14.01l-3-3")
}

fn main() {
    yew::Renderer::<App>::new().render();
}
