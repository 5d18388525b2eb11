//! Bank-account registry: filterable list with a branch scope selector,
//! create/edit modal and activate/deactivate toggles.

use gloo_console::error;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, InputEvent};
use yew::prelude::*;

use crate::api::{CuentasApi, SucursalesApi};
use crate::models::{
    format_date, validate_cuenta, Cuenta, CuentaFilters, CuentaPayload, Moneda, Pagination,
    Sucursal, SucursalFilters, SucursalScope, TipoCuenta,
};
use crate::{
    icon_edit, icon_plus, icon_search, icon_toggle, icon_trash, notice_banner, page_shell, Notice,
    PaginationControls,
};

fn empty_pagination() -> Pagination {
    Pagination {
        total: 0,
        page: 1,
        limit: 10,
        total_pages: 0,
    }
}

#[derive(Properties, PartialEq)]
struct CuentaFormProps {
    initial: Option<Cuenta>,
    sucursales: Vec<Sucursal>,
    saving: bool,
    on_submit: Callback<CuentaPayload>,
    on_cancel: Callback<()>,
}

#[function_component(CuentaFormModal)]
fn cuenta_form_modal(props: &CuentaFormProps) -> Html {
    let titular = use_state(|| {
        props
            .initial
            .as_ref()
            .map(|c| c.titular.clone())
            .unwrap_or_default()
    });
    let numero_cuenta = use_state(|| {
        props
            .initial
            .as_ref()
            .map(|c| c.numero_cuenta.clone())
            .unwrap_or_default()
    });
    let cci = use_state(|| {
        props
            .initial
            .as_ref()
            .map(|c| c.cci.clone())
            .unwrap_or_default()
    });
    let moneda = use_state(|| {
        props
            .initial
            .as_ref()
            .and_then(|c| c.moneda)
            .unwrap_or(Moneda::PEN)
    });
    let tipo = use_state(|| {
        props
            .initial
            .as_ref()
            .and_then(|c| c.tipo)
            .unwrap_or(TipoCuenta::Ahorros)
    });
    let banco = use_state(|| {
        props
            .initial
            .as_ref()
            .and_then(|c| c.banco.clone())
            .unwrap_or_default()
    });
    let es_empresa = use_state(|| props.initial.as_ref().map(|c| c.es_empresa).unwrap_or(false));
    let propia_empresa = use_state(|| {
        props
            .initial
            .as_ref()
            .map(|c| c.propia_empresa)
            .unwrap_or(false)
    });
    let is_active = use_state(|| props.initial.as_ref().map(|c| c.is_active).unwrap_or(true));
    // Empty string means "cuenta global", no branch assigned.
    let sucursal_id = use_state(|| {
        props
            .initial
            .as_ref()
            .and_then(|c| c.sucursal_id)
            .map(|id| id.to_string())
            .unwrap_or_default()
    });
    let form_error = use_state(|| None::<String>);

    let is_edit = props.initial.is_some();

    let on_save = {
        let titular = titular.clone();
        let numero_cuenta = numero_cuenta.clone();
        let cci = cci.clone();
        let moneda = moneda.clone();
        let tipo = tipo.clone();
        let banco = banco.clone();
        let es_empresa = es_empresa.clone();
        let propia_empresa = propia_empresa.clone();
        let is_active = is_active.clone();
        let sucursal_id = sucursal_id.clone();
        let form_error = form_error.clone();
        let on_submit = props.on_submit.clone();

        Callback::from(move |_| {
            if let Some(message) = validate_cuenta(&titular, &numero_cuenta) {
                form_error.set(Some(message));
                return;
            }
            form_error.set(None);

            let banco = banco.trim();
            on_submit.emit(CuentaPayload {
                titular: titular.trim().to_string(),
                numero_cuenta: numero_cuenta.trim().to_string(),
                cci: cci.trim().to_string(),
                moneda: *moneda,
                tipo: *tipo,
                banco: if banco.is_empty() {
                    None
                } else {
                    Some(banco.to_string())
                },
                es_empresa: *es_empresa,
                propia_empresa: *propia_empresa,
                is_active: *is_active,
                sucursal_id: sucursal_id.parse().ok(),
            });
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };

    let text_input = |label: &'static str,
                      placeholder: &'static str,
                      handle: &UseStateHandle<String>|
     -> Html {
        let handle = handle.clone();
        let value = (*handle).clone();
        html! {
            <div class="space-y-1">
                <label class="text-[12px] font-bold text-muted-foreground">{ label }</label>
                <input type="text" placeholder={placeholder} value={value} oninput={Callback::from(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    handle.set(input.value());
                })} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none" />
            </div>
        }
    };

    let checkbox = |label: &'static str, handle: &UseStateHandle<bool>| -> Html {
        let handle = handle.clone();
        let checked = *handle;
        html! {
            <label class="flex items-center gap-2 text-sm text-foreground">
                <input type="checkbox" checked={checked} onchange={Callback::from(move |e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    handle.set(input.checked());
                })} />
                { label }
            </label>
        }
    };

    html! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50 p-4">
            <div class="bg-white rounded-[16px] shadow-xl w-full max-w-2xl p-6">
                <h3 class="text-lg font-bold text-[#173E63] mb-4">
                    { if is_edit { "Editar Cuenta" } else { "Nueva Cuenta" } }
                </h3>

                <div class="space-y-3">
                    { text_input("Titular", "Nombre del titular...", &titular) }
                    <div class="grid grid-cols-2 gap-3">
                        { text_input("Número de Cuenta", "0011-0000-0000000000", &numero_cuenta) }
                        { text_input("CCI", "011-000-000000000000-00", &cci) }
                    </div>

                    <div class="grid grid-cols-3 gap-3">
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Moneda"}</label>
                            <select onchange={{
                                let moneda = moneda.clone();
                                Callback::from(move |e: Event| {
                                    let select: HtmlSelectElement = e.target_unchecked_into();
                                    if let Some(parsed) = Moneda::parse(&select.value()) {
                                        moneda.set(parsed);
                                    }
                                })
                            }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none">
                                { for Moneda::ALL.iter().map(|m| html! {
                                    <option value={m.as_str()} selected={*moneda == *m}>{ m.label() }</option>
                                }) }
                            </select>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Tipo"}</label>
                            <select onchange={{
                                let tipo = tipo.clone();
                                Callback::from(move |e: Event| {
                                    let select: HtmlSelectElement = e.target_unchecked_into();
                                    if let Some(parsed) = TipoCuenta::parse(&select.value()) {
                                        tipo.set(parsed);
                                    }
                                })
                            }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none">
                                { for TipoCuenta::ALL.iter().map(|t| html! {
                                    <option value={t.as_str()} selected={*tipo == *t}>{ t.label() }</option>
                                }) }
                            </select>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Sucursal"}</label>
                            <select onchange={{
                                let sucursal_id = sucursal_id.clone();
                                Callback::from(move |e: Event| {
                                    let select: HtmlSelectElement = e.target_unchecked_into();
                                    sucursal_id.set(select.value());
                                })
                            }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none">
                                <option value="" selected={sucursal_id.is_empty()}>{"Global (sin sucursal)"}</option>
                                { for props.sucursales.iter().map(|s| {
                                    let value = s.id.to_string();
                                    let selected = *sucursal_id == value;
                                    html! { <option value={value} selected={selected}>{ s.name.clone() }</option> }
                                }) }
                            </select>
                        </div>
                    </div>

                    { text_input("Banco", "BCP, Interbank...", &banco) }

                    <div class="flex gap-6">
                        { checkbox("Cuenta de empresa", &es_empresa) }
                        { checkbox("Cuenta propia de la empresa", &propia_empresa) }
                        { checkbox("Cuenta activa", &is_active) }
                    </div>

                    {
                        if let Some(msg) = &*form_error {
                            html! { <p class="text-sm text-red-500">{ msg.clone() }</p> }
                        } else {
                            html! {}
                        }
                    }
                </div>

                <div class="flex justify-end gap-3 mt-6">
                    <button onclick={on_cancel} disabled={props.saving}
                        class="px-4 py-2 text-sm rounded-[10px] text-slate-500 hover:bg-slate-100">
                        {"Cancelar"}
                    </button>
                    <button onclick={on_save} disabled={props.saving}
                        class="px-4 py-2 text-sm rounded-[10px] bg-[#173E63] text-white font-bold disabled:opacity-60">
                        { if props.saving { "Guardando..." } else if is_edit { "Actualizar Cuenta" } else { "Crear Cuenta" } }
                    </button>
                </div>
            </div>
        </div>
    }
}

#[function_component(CuentasPage)]
pub fn cuentas_page() -> Html {
    let cuentas = use_state(Vec::<Cuenta>::new);
    let sucursales = use_state(Vec::<Sucursal>::new);
    let pagination = use_state(empty_pagination);
    let filters = use_state(CuentaFilters::default);
    let loading = use_state(|| true);
    let notice = use_state(|| None::<Notice>);
    let refresh = use_state(|| 0u32);

    let show_form = use_state(|| false);
    let editing = use_state(|| None::<Cuenta>);
    let delete_target = use_state(|| None::<Cuenta>);
    let saving = use_state(|| false);

    // Branch list for the scope selector and the form, loaded once.
    {
        let sucursales = sucursales.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let all = SucursalFilters {
                        limit: 100,
                        ..SucursalFilters::default()
                    };
                    match SucursalesApi::get_all(&all).await {
                        Ok(resp) => sucursales.set(resp.data),
                        Err(err) => error!(format!("Error al cargar sucursales: {}", err)),
                    }
                });
                || ()
            },
            (),
        );
    }

    {
        let cuentas = cuentas.clone();
        let pagination = pagination.clone();
        let loading = loading.clone();
        let notice = notice.clone();

        use_effect_with_deps(
            move |(filters, _refresh): &(CuentaFilters, u32)| {
                let filters = filters.clone();
                loading.set(true);
                spawn_local(async move {
                    match CuentasApi::get_all(&filters).await {
                        Ok(resp) => {
                            cuentas.set(resp.data);
                            pagination.set(resp.pagination);
                        }
                        Err(err) => {
                            error!(format!("Error al cargar cuentas: {}", err));
                            notice.set(Some(Notice::error("No se pudo cargar las cuentas")));
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            ((*filters).clone(), *refresh),
        );
    }

    let on_page_change = {
        let filters = filters.clone();
        Callback::from(move |page: u32| {
            filters.set((*filters).clone().with_page(page));
        })
    };

    let on_search = {
        let filters = filters.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            filters.set((*filters).clone().with_search(&input.value()));
        })
    };

    let on_moneda_change = {
        let filters = filters.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            filters.set((*filters).clone().with_moneda(Moneda::parse(&select.value())));
        })
    };

    let on_tipo_change = {
        let filters = filters.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            filters.set((*filters).clone().with_tipo(TipoCuenta::parse(&select.value())));
        })
    };

    let on_sucursal_change = {
        let filters = filters.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            filters.set(
                (*filters)
                    .clone()
                    .with_sucursal(SucursalScope::from_value(&select.value())),
            );
        })
    };

    let on_estado_change = {
        let filters = filters.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = match select.value().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            };
            filters.set((*filters).clone().with_is_active(value));
        })
    };

    let on_clear_filters = {
        let filters = filters.clone();
        Callback::from(move |_| filters.set(CuentaFilters::default()))
    };

    let on_new = {
        let show_form = show_form.clone();
        let editing = editing.clone();
        let notice = notice.clone();
        Callback::from(move |_| {
            editing.set(None);
            notice.set(None);
            show_form.set(true);
        })
    };

    let on_cancel_form = {
        let show_form = show_form.clone();
        Callback::from(move |_| show_form.set(false))
    };

    let on_submit_form = {
        let editing = editing.clone();
        let show_form = show_form.clone();
        let saving = saving.clone();
        let notice = notice.clone();
        let refresh = refresh.clone();

        Callback::from(move |payload: CuentaPayload| {
            let editing_id = editing.as_ref().map(|c| c.id);
            let show_form = show_form.clone();
            let saving = saving.clone();
            let notice = notice.clone();
            let refresh = refresh.clone();

            saving.set(true);
            spawn_local(async move {
                let result = match editing_id {
                    Some(id) => CuentasApi::update(id, &payload).await,
                    None => CuentasApi::create(&payload).await,
                };
                match result {
                    Ok(_) => {
                        notice.set(Some(Notice::success(if editing_id.is_some() {
                            "Cuenta actualizada correctamente"
                        } else {
                            "Cuenta creada correctamente"
                        })));
                        show_form.set(false);
                        refresh.set(*refresh + 1);
                    }
                    Err(err) => {
                        error!(format!("Error al guardar cuenta: {}", err));
                        notice.set(Some(Notice::error("No se pudo guardar la cuenta")));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_toggle = {
        let saving = saving.clone();
        let notice = notice.clone();
        let refresh = refresh.clone();
        Callback::from(move |cuenta: Cuenta| {
            let saving = saving.clone();
            let notice = notice.clone();
            let refresh = refresh.clone();
            saving.set(true);
            spawn_local(async move {
                match CuentasApi::toggle_status(cuenta.id).await {
                    Ok(updated) => {
                        notice.set(Some(Notice::success(if updated.is_active {
                            "Cuenta activada correctamente"
                        } else {
                            "Cuenta desactivada correctamente"
                        })));
                        refresh.set(*refresh + 1);
                    }
                    Err(err) => {
                        error!(format!("Error al cambiar estado de cuenta: {}", err));
                        notice.set(Some(Notice::error(
                            "No se pudo cambiar el estado de la cuenta",
                        )));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_confirm_delete = {
        let delete_target = delete_target.clone();
        let saving = saving.clone();
        let notice = notice.clone();
        let refresh = refresh.clone();
        Callback::from(move |_| {
            let Some(target) = (*delete_target).clone() else {
                return;
            };
            let delete_target = delete_target.clone();
            let saving = saving.clone();
            let notice = notice.clone();
            let refresh = refresh.clone();
            saving.set(true);
            spawn_local(async move {
                match CuentasApi::delete(target.id).await {
                    Ok(()) => {
                        notice.set(Some(Notice::success("Cuenta eliminada correctamente")));
                        delete_target.set(None);
                        refresh.set(*refresh + 1);
                    }
                    Err(err) => {
                        error!(format!("Error al eliminar cuenta: {}", err));
                        notice.set(Some(Notice::error("No se pudo eliminar la cuenta")));
                    }
                }
                saving.set(false);
            });
        })
    };

    let estado_value = match filters.is_active {
        Some(true) => "true",
        Some(false) => "false",
        None => "",
    };
    let moneda_value = filters.moneda.map(|m| m.as_str()).unwrap_or("");
    let tipo_value = filters.tipo.map(|t| t.as_str()).unwrap_or("");
    let scope_value = filters.sucursal.as_value();

    html! {
        { page_shell(
            "Gestión de Cuentas",
            "Registro de cuentas bancarias propias y de terceros",
            html! {
                <button onclick={on_new} class="flex items-center gap-2 bg-[#173E63] text-white px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    { icon_plus() }
                    {"Nueva Cuenta"}
                </button>
            },
            html! {
                <>
                    { notice_banner(&notice) }

                    <div class="bg-card rounded-[10px] p-4 border border-border grid grid-cols-2 md:grid-cols-6 gap-3">
                        <div class="space-y-1 col-span-2">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Buscar"}</label>
                            <div class="relative">
                                <span class="absolute left-3 top-2.5 text-slate-400">{ icon_search() }</span>
                                <input type="text" placeholder="Titular, número o CCI..."
                                    value={filters.search.clone().unwrap_or_default()}
                                    oninput={on_search}
                                    class="w-full bg-[#f1f4f9] rounded-[10px] pl-8 pr-3 py-2 text-sm text-[#173E63] border-none" />
                            </div>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Moneda"}</label>
                            <select onchange={on_moneda_change}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none">
                                <option value="" selected={moneda_value.is_empty()}>{"Todas"}</option>
                                { for Moneda::ALL.iter().map(|m| html! {
                                    <option value={m.as_str()} selected={moneda_value == m.as_str()}>{ m.as_str() }</option>
                                }) }
                            </select>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Tipo"}</label>
                            <select onchange={on_tipo_change}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none">
                                <option value="" selected={tipo_value.is_empty()}>{"Todos"}</option>
                                { for TipoCuenta::ALL.iter().map(|t| html! {
                                    <option value={t.as_str()} selected={tipo_value == t.as_str()}>{ t.label() }</option>
                                }) }
                            </select>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Sucursal"}</label>
                            <select onchange={on_sucursal_change}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none">
                                <option value="" selected={scope_value.is_empty()}>{"Todas"}</option>
                                <option value="null" selected={scope_value == "null"}>{"Globales"}</option>
                                { for sucursales.iter().map(|s| {
                                    let value = s.id.to_string();
                                    let selected = scope_value == value;
                                    html! { <option value={value} selected={selected}>{ s.name.clone() }</option> }
                                }) }
                            </select>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Estado"}</label>
                            <select onchange={on_estado_change}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none">
                                <option value="" selected={estado_value.is_empty()}>{"Todas"}</option>
                                <option value="true" selected={estado_value == "true"}>{"Activas"}</option>
                                <option value="false" selected={estado_value == "false"}>{"Inactivas"}</option>
                            </select>
                        </div>
                        <div class="flex items-end col-span-2 md:col-span-6 justify-end">
                            <button onclick={on_clear_filters} disabled={*loading}
                                class="px-4 py-2 text-sm rounded-[10px] text-slate-500 hover:bg-slate-100">
                                {"Limpiar"}
                            </button>
                        </div>
                    </div>

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="p-4 flex justify-between items-center border-b border-border">
                            <span class="text-sm text-muted-foreground">
                                { if *loading {
                                    "Cargando...".to_string()
                                } else {
                                    format!("Mostrando {} de {} cuentas", cuentas.len(), pagination.total)
                                }}
                            </span>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-6 py-3 font-bold">{"Titular"}</th>
                                        <th class="px-6 py-3 font-bold">{"Cuenta / CCI"}</th>
                                        <th class="px-6 py-3 font-bold">{"Moneda"}</th>
                                        <th class="px-6 py-3 font-bold">{"Tipo"}</th>
                                        <th class="px-6 py-3 font-bold">{"Sucursal"}</th>
                                        <th class="px-6 py-3 font-bold">{"Estado"}</th>
                                        <th class="px-6 py-3 font-bold">{"Creada"}</th>
                                        <th class="px-6 py-3 font-bold">{"Acciones"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if *loading {
                                        html! { <tr><td colspan="8" class="px-6 py-6 text-center text-muted-foreground">{"Cargando..."}</td></tr> }
                                    } else if cuentas.is_empty() {
                                        html! { <tr><td colspan="8" class="px-6 py-6 text-center text-muted-foreground">{"No se encontraron cuentas"}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                                { for cuentas.iter().map(|cuenta| {
                                                    let on_toggle = on_toggle.clone();
                                                    let on_edit = {
                                                        let editing = editing.clone();
                                                        let show_form = show_form.clone();
                                                        let c = cuenta.clone();
                                                        Callback::from(move |_| {
                                                            editing.set(Some(c.clone()));
                                                            show_form.set(true);
                                                        })
                                                    };
                                                    let on_delete = {
                                                        let delete_target = delete_target.clone();
                                                        let c = cuenta.clone();
                                                        Callback::from(move |_| delete_target.set(Some(c.clone())))
                                                    };
                                                    let toggle_c = cuenta.clone();
                                                    let sucursal_name = cuenta
                                                        .sucursal
                                                        .as_ref()
                                                        .map(|s| s.name.clone())
                                                        .unwrap_or_else(|| "Global".to_string());

                                                    html! {
                                                        <tr key={cuenta.id} class="text-sm hover:bg-muted/30 transition-colors">
                                                            <td class="px-6 py-3">
                                                                <p class="font-semibold text-foreground">{ &cuenta.titular }</p>
                                                                { if let Some(banco) = &cuenta.banco {
                                                                    html! { <p class="text-xs text-muted-foreground">{ banco.clone() }</p> }
                                                                } else { html!{} } }
                                                            </td>
                                                            <td class="px-6 py-3">
                                                                <p class="text-foreground">{ &cuenta.numero_cuenta }</p>
                                                                { if !cuenta.cci.is_empty() {
                                                                    html! { <p class="text-xs text-muted-foreground">{ format!("CCI: {}", cuenta.cci) }</p> }
                                                                } else { html!{} } }
                                                            </td>
                                                            <td class="px-6 py-3 text-muted-foreground">
                                                                { cuenta.moneda.map(|m| m.as_str()).unwrap_or("—") }
                                                            </td>
                                                            <td class="px-6 py-3 text-muted-foreground">
                                                                { cuenta.tipo.map(|t| t.label()).unwrap_or("—") }
                                                            </td>
                                                            <td class="px-6 py-3 text-muted-foreground">{ sucursal_name }</td>
                                                            <td class="px-6 py-3">
                                                                { if cuenta.is_active {
                                                                    html! { <span class="bg-green-100 text-green-800 px-2.5 py-1 rounded-full text-[10px] font-bold">{"Activa"}</span> }
                                                                } else {
                                                                    html! { <span class="bg-slate-100 text-slate-600 px-2.5 py-1 rounded-full text-[10px] font-bold">{"Inactiva"}</span> }
                                                                }}
                                                            </td>
                                                            <td class="px-6 py-3 text-muted-foreground">{ format_date(&cuenta.created_at) }</td>
                                                            <td class="px-6 py-3">
                                                                <div class="flex items-center gap-1">
                                                                    <button title="Activar/Desactivar" disabled={*saving}
                                                                        onclick={Callback::from(move |_| on_toggle.emit(toggle_c.clone()))}
                                                                        class="p-1.5 rounded-lg text-slate-500 hover:bg-slate-100">
                                                                        { icon_toggle() }
                                                                    </button>
                                                                    <button title="Editar" disabled={*saving} onclick={on_edit}
                                                                        class="p-1.5 rounded-lg text-yellow-600 hover:bg-yellow-50">
                                                                        { icon_edit() }
                                                                    </button>
                                                                    <button title="Eliminar" disabled={*saving} onclick={on_delete}
                                                                        class="p-1.5 rounded-lg text-red-600 hover:bg-red-50">
                                                                        { icon_trash() }
                                                                    </button>
                                                                </div>
                                                            </td>
                                                        </tr>
                                                    }
                                                }) }
                                            </>
                                        }
                                    }}
                                </tbody>
                            </table>
                        </div>
                        <div class="px-4 pb-4">
                            <PaginationControls
                                page={pagination.page}
                                total_pages={pagination.total_pages}
                                disabled={*loading}
                                on_change={on_page_change} />
                        </div>
                    </div>

                    {
                        if *show_form {
                            html! {
                                <CuentaFormModal
                                    initial={(*editing).clone()}
                                    sucursales={(*sucursales).clone()}
                                    saving={*saving}
                                    on_submit={on_submit_form}
                                    on_cancel={on_cancel_form} />
                            }
                        } else {
                            html! {}
                        }
                    }

                    {
                        if let Some(target) = &*delete_target {
                            let on_close = {
                                let delete_target = delete_target.clone();
                                Callback::from(move |_| delete_target.set(None))
                            };
                            html! {
                                <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50 p-4">
                                    <div class="bg-white rounded-[16px] shadow-xl w-full max-w-md p-6">
                                        <h3 class="text-lg font-bold text-[#173E63] mb-2">{"Eliminar Cuenta"}</h3>
                                        <p class="text-sm text-slate-600">
                                            { format!("¿Estás seguro de eliminar la cuenta de \"{}\"? Esta acción no se puede deshacer.", target.titular) }
                                        </p>
                                        <div class="flex justify-end gap-3 mt-6">
                                            <button onclick={on_close} disabled={*saving}
                                                class="px-4 py-2 text-sm rounded-[10px] text-slate-500 hover:bg-slate-100">
                                                {"Cancelar"}
                                            </button>
                                            <button onclick={on_confirm_delete.clone()} disabled={*saving}
                                                class="px-4 py-2 text-sm rounded-[10px] bg-red-600 text-white font-bold disabled:opacity-60">
                                                { if *saving { "Eliminando..." } else { "Eliminar" } }
                                            </button>
                                        </div>
                                    </div>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </>
            }
        ) }
    }
}
