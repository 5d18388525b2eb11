//! Payment requests: filterable list with the status workflow, voucher and
//! document attachments, and the admin-only change-status action.

use gloo_console::error;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, InputEvent};
use yew::prelude::*;

use crate::api::{CuentasApi, FilesApi, PagosApi, SucursalesApi};
use crate::models::{
    can_change_status, format_date, format_money, validate_pago, voucher_hint,
    voucher_upload_enabled, Cuenta, FileCategory, FileResponse, Moneda, Pago, PagoFilters,
    PagoPayload, StatusPago, Sucursal, SucursalFilters,
};
use crate::session::SessionUser;
use crate::{
    icon_edit, icon_eye, icon_file, icon_plus, icon_search, icon_status, icon_trash, icon_upload,
    notice_banner, page_shell, Notice, PaginationControls,
};

/// Branchless payments are shown under "General" rather than with a blank cell.
fn sucursal_label(pago: &Pago) -> String {
    pago.sucursal
        .as_ref()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "General".to_string())
}

#[derive(Properties, PartialEq)]
struct PagoFormProps {
    initial: Option<Pago>,
    sucursales: Vec<Sucursal>,
    cuentas: Vec<Cuenta>,
    saving: bool,
    on_submit: Callback<PagoPayload>,
    on_cancel: Callback<()>,
}

#[function_component(PagoFormModal)]
fn pago_form_modal(props: &PagoFormProps) -> Html {
    let descripcion = use_state(|| {
        props
            .initial
            .as_ref()
            .map(|p| p.descripcion.clone())
            .unwrap_or_default()
    });
    let justificacion = use_state(|| {
        props
            .initial
            .as_ref()
            .and_then(|p| p.justificacion.clone())
            .unwrap_or_default()
    });
    let coordinado_con = use_state(|| {
        props
            .initial
            .as_ref()
            .and_then(|p| p.coordinado_con.clone())
            .unwrap_or_default()
    });
    let total = use_state(|| {
        props
            .initial
            .as_ref()
            .map(|p| p.total.to_string())
            .unwrap_or_default()
    });
    let moneda = use_state(|| {
        props
            .initial
            .as_ref()
            .map(|p| p.moneda)
            .unwrap_or(Moneda::PEN)
    });
    let sucursal_id = use_state(|| {
        props
            .initial
            .as_ref()
            .and_then(|p| p.sucursal_id)
            .map(|id| id.to_string())
            .unwrap_or_default()
    });
    let cuenta_destino_id = use_state(|| {
        props
            .initial
            .as_ref()
            .and_then(|p| p.cuenta_destino_id)
            .map(|id| id.to_string())
            .unwrap_or_default()
    });
    let cuenta_propia_id = use_state(|| {
        props
            .initial
            .as_ref()
            .and_then(|p| p.cuenta_propia_empresa_id)
            .map(|id| id.to_string())
            .unwrap_or_default()
    });
    // Attachments live server-side the moment they are picked; the form only
    // carries their ids into the final payload.
    let voucher = use_state(|| props.initial.as_ref().and_then(|p| p.voucher_file.clone()));
    let documents = use_state(|| {
        props
            .initial
            .as_ref()
            .map(|p| p.document_files.clone())
            .unwrap_or_default()
    });
    let uploading = use_state(|| false);
    let form_error = use_state(|| None::<String>);

    let is_edit = props.initial.is_some();
    let voucher_enabled = voucher_upload_enabled(props.initial.as_ref());
    let hint = voucher_hint(props.initial.as_ref());

    let on_voucher_selected = {
        let voucher = voucher.clone();
        let uploading = uploading.clone();
        let form_error = form_error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|l| l.get(0)) else {
                return;
            };
            input.set_value("");
            let voucher = voucher.clone();
            let uploading = uploading.clone();
            let form_error = form_error.clone();
            uploading.set(true);
            spawn_local(async move {
                match FilesApi::upload(&file, FileCategory::Voucher).await {
                    Ok(resp) => voucher.set(Some(resp)),
                    Err(err) => {
                        error!(format!("Error al subir voucher: {}", err));
                        form_error.set(Some("No se pudo subir el voucher".to_string()));
                    }
                }
                uploading.set(false);
            });
        })
    };

    let on_documents_selected = {
        let documents = documents.clone();
        let uploading = uploading.clone();
        let form_error = form_error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(list) = input.files() else {
                return;
            };
            let mut files = Vec::new();
            for i in 0..list.length() {
                if let Some(file) = list.get(i) {
                    files.push(file);
                }
            }
            input.set_value("");
            if files.is_empty() {
                return;
            }
            let documents = documents.clone();
            let uploading = uploading.clone();
            let form_error = form_error.clone();
            uploading.set(true);
            // Uploads run one at a time so the resulting list keeps the order
            // in which the files were picked.
            spawn_local(async move {
                let mut current = (*documents).clone();
                for file in files {
                    match FilesApi::upload(&file, FileCategory::Document).await {
                        Ok(resp) => {
                            current.push(resp);
                            documents.set(current.clone());
                        }
                        Err(err) => {
                            error!(format!("Error al subir documento: {}", err));
                            form_error.set(Some("No se pudo subir un documento".to_string()));
                        }
                    }
                }
                uploading.set(false);
            });
        })
    };

    let on_remove_document = {
        let documents = documents.clone();
        Callback::from(move |id: i64| {
            let documents = documents.clone();
            spawn_local(async move {
                if let Err(err) = FilesApi::delete(id).await {
                    error!(format!("Error al eliminar documento: {}", err));
                }
                let remaining: Vec<FileResponse> = documents
                    .iter()
                    .filter(|f| f.id != id)
                    .cloned()
                    .collect();
                documents.set(remaining);
            });
        })
    };

    let on_save = {
        let descripcion = descripcion.clone();
        let justificacion = justificacion.clone();
        let coordinado_con = coordinado_con.clone();
        let total = total.clone();
        let moneda = moneda.clone();
        let sucursal_id = sucursal_id.clone();
        let cuenta_destino_id = cuenta_destino_id.clone();
        let cuenta_propia_id = cuenta_propia_id.clone();
        let voucher = voucher.clone();
        let documents = documents.clone();
        let form_error = form_error.clone();
        let on_submit = props.on_submit.clone();

        Callback::from(move |_| {
            let total_value: f64 = total.trim().parse().unwrap_or(0.0);
            if let Some(message) = validate_pago(&descripcion, total_value) {
                form_error.set(Some(message));
                return;
            }
            form_error.set(None);

            let trimmed = |value: &str| {
                let value = value.trim();
                if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            };
            let ids: Vec<i64> = documents.iter().map(|f| f.id).collect();
            on_submit.emit(PagoPayload {
                descripcion: descripcion.trim().to_string(),
                justificacion: trimmed(&justificacion),
                coordinado_con: trimmed(&coordinado_con),
                total: total_value,
                moneda: *moneda,
                sucursal_id: sucursal_id.parse().ok(),
                cuenta_destino_id: cuenta_destino_id.parse().ok(),
                cuenta_propia_empresa_id: cuenta_propia_id.parse().ok(),
                voucher_file_id: voucher.as_ref().map(|v| v.id),
                document_file_ids: if ids.is_empty() { None } else { Some(ids) },
            });
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };

    let cuenta_select = |label: &'static str,
                         handle: &UseStateHandle<String>,
                         solo_propias: bool|
     -> Html {
        let handle = handle.clone();
        let current = (*handle).clone();
        let options: Vec<&Cuenta> = props
            .cuentas
            .iter()
            .filter(|c| !solo_propias || c.propia_empresa)
            .collect();
        html! {
            <div class="space-y-1">
                <label class="text-[12px] font-bold text-muted-foreground">{ label }</label>
                <select onchange={Callback::from(move |e: Event| {
                    let select: HtmlSelectElement = e.target_unchecked_into();
                    handle.set(select.value());
                })} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none">
                    <option value="" selected={current.is_empty()}>{"Sin cuenta"}</option>
                    { for options.iter().map(|c| {
                        let value = c.id.to_string();
                        let selected = current == value;
                        html! {
                            <option value={value} selected={selected}>
                                { format!("{} - {}", c.titular, c.numero_cuenta) }
                            </option>
                        }
                    }) }
                </select>
            </div>
        }
    };

    html! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50 p-4 overflow-y-auto">
            <div class="bg-white rounded-[16px] shadow-xl w-full max-w-2xl p-6 my-8">
                <h3 class="text-lg font-bold text-[#173E63] mb-4">
                    { if is_edit { "Editar Pago" } else { "Nuevo Pago" } }
                </h3>

                <div class="space-y-3">
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{"Descripción"}</label>
                        <textarea rows="2" placeholder="Motivo del pago..."
                            value={(*descripcion).clone()}
                            oninput={{
                                let descripcion = descripcion.clone();
                                Callback::from(move |e: InputEvent| {
                                    let area: HtmlTextAreaElement = e.target_unchecked_into();
                                    descripcion.set(area.value());
                                })
                            }}
                            class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none" />
                    </div>

                    <div class="grid grid-cols-2 gap-3">
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Justificación"}</label>
                            <input type="text" placeholder="Opcional" value={(*justificacion).clone()}
                                oninput={{
                                    let justificacion = justificacion.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        justificacion.set(input.value());
                                    })
                                }}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none" />
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Coordinado con"}</label>
                            <input type="text" placeholder="Opcional" value={(*coordinado_con).clone()}
                                oninput={{
                                    let coordinado_con = coordinado_con.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        coordinado_con.set(input.value());
                                    })
                                }}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none" />
                        </div>
                    </div>

                    <div class="grid grid-cols-3 gap-3">
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Monto"}</label>
                            <input type="number" step="0.01" min="0" placeholder="0.00" value={(*total).clone()}
                                oninput={{
                                    let total = total.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        total.set(input.value());
                                    })
                                }}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none" />
                        </div>
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
                            <label class="text-[12px] font-bold text-muted-foreground">{"Sucursal"}</label>
                            <select onchange={{
                                let sucursal_id = sucursal_id.clone();
                                Callback::from(move |e: Event| {
                                    let select: HtmlSelectElement = e.target_unchecked_into();
                                    sucursal_id.set(select.value());
                                })
                            }} class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none">
                                <option value="" selected={sucursal_id.is_empty()}>{"Sin sucursal"}</option>
                                { for props.sucursales.iter().map(|s| {
                                    let value = s.id.to_string();
                                    let selected = *sucursal_id == value;
                                    html! { <option value={value} selected={selected}>{ s.name.clone() }</option> }
                                }) }
                            </select>
                        </div>
                    </div>

                    <div class="grid grid-cols-2 gap-3">
                        { cuenta_select("Cuenta destino", &cuenta_destino_id, false) }
                        { cuenta_select("Cuenta propia de la empresa", &cuenta_propia_id, true) }
                    </div>

                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{"Voucher"}</label>
                        {
                            if let Some(v) = &*voucher {
                                html! {
                                    <div class="flex items-center gap-2 text-sm text-foreground bg-[#f1f4f9] rounded-[10px] px-3 py-2">
                                        { icon_file() }
                                        <span class="flex-1 truncate">{ v.original_name.clone() }</span>
                                    </div>
                                }
                            } else {
                                html! {}
                            }
                        }
                        <label class={classes!(
                            "flex", "items-center", "gap-2", "text-sm", "rounded-[10px]", "px-3", "py-2", "border", "border-dashed", "border-border",
                            if voucher_enabled { "cursor-pointer text-[#173E63] hover:bg-slate-50" } else { "text-slate-400 cursor-not-allowed" }
                        )}>
                            { icon_upload() }
                            { if voucher.is_some() { "Reemplazar voucher" } else { "Subir voucher" } }
                            <input type="file" class="hidden" disabled={!voucher_enabled || *uploading}
                                onchange={on_voucher_selected} />
                        </label>
                        {
                            if let Some(hint) = hint {
                                html! { <p class="text-xs text-muted-foreground">{ hint }</p> }
                            } else {
                                html! {}
                            }
                        }
                    </div>

                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{"Documentos"}</label>
                        {
                            if documents.is_empty() {
                                html! {}
                            } else {
                                html! {
                                    <ul class="space-y-1">
                                        { for documents.iter().map(|doc| {
                                            let on_remove = {
                                                let on_remove_document = on_remove_document.clone();
                                                let id = doc.id;
                                                Callback::from(move |_| on_remove_document.emit(id))
                                            };
                                            html! {
                                                <li key={doc.id} class="flex items-center gap-2 text-sm text-foreground bg-[#f1f4f9] rounded-[10px] px-3 py-2">
                                                    { icon_file() }
                                                    <span class="flex-1 truncate">{ doc.original_name.clone() }</span>
                                                    <button onclick={on_remove} disabled={*uploading}
                                                        class="text-red-500 hover:text-red-700">
                                                        { icon_trash() }
                                                    </button>
                                                </li>
                                            }
                                        }) }
                                    </ul>
                                }
                            }
                        }
                        <label class="flex items-center gap-2 text-sm rounded-[10px] px-3 py-2 border border-dashed border-border cursor-pointer text-[#173E63] hover:bg-slate-50">
                            { icon_upload() }
                            { if *uploading { "Subiendo..." } else { "Agregar documentos" } }
                            <input type="file" multiple={true} class="hidden" disabled={*uploading}
                                onchange={on_documents_selected} />
                        </label>
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
                    <button onclick={on_save} disabled={props.saving || *uploading}
                        class="px-4 py-2 text-sm rounded-[10px] bg-[#173E63] text-white font-bold disabled:opacity-60">
                        { if props.saving { "Guardando..." } else if is_edit { "Actualizar Pago" } else { "Crear Pago" } }
                    </button>
                </div>
            </div>
        </div>
    }
}

#[function_component(PagosPage)]
pub fn pagos_page() -> Html {
    let pagos = use_state(Vec::<Pago>::new);
    let sucursales = use_state(Vec::<Sucursal>::new);
    let cuentas = use_state(Vec::<Cuenta>::new);
    let total = use_state(|| 0u32);
    let total_pages = use_state(|| 0u32);
    let filters = use_state(PagoFilters::default);
    let loading = use_state(|| true);
    let notice = use_state(|| None::<Notice>);
    let refresh = use_state(|| 0u32);

    let show_form = use_state(|| false);
    let editing = use_state(|| None::<Pago>);
    let delete_target = use_state(|| None::<Pago>);
    let status_target = use_state(|| None::<Pago>);
    let saving = use_state(|| false);

    let user = use_context::<UseStateHandle<Option<SessionUser>>>();
    let can_change = user
        .as_ref()
        .and_then(|handle| (**handle).as_ref().map(|u| can_change_status(&u.role)))
        .unwrap_or(false);

    // Reference data for the selects, loaded once.
    {
        let sucursales = sucursales.clone();
        let cuentas = cuentas.clone();
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
                    match CuentasApi::active_list().await {
                        Ok(list) => cuentas.set(list),
                        Err(err) => error!(format!("Error al cargar cuentas: {}", err)),
                    }
                });
                || ()
            },
            (),
        );
    }

    {
        let pagos = pagos.clone();
        let total = total.clone();
        let total_pages = total_pages.clone();
        let loading = loading.clone();
        let notice = notice.clone();

        use_effect_with_deps(
            move |(filters, _refresh): &(PagoFilters, u32)| {
                let filters = filters.clone();
                loading.set(true);
                spawn_local(async move {
                    match PagosApi::get_all(&filters).await {
                        Ok(resp) => {
                            total.set(resp.total);
                            total_pages.set(resp.total_pages());
                            pagos.set(resp.data);
                        }
                        Err(err) => {
                            error!(format!("Error al cargar pagos: {}", err));
                            notice.set(Some(Notice::error("No se pudo cargar los pagos")));
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

    let on_status_filter = {
        let filters = filters.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            filters.set(
                (*filters)
                    .clone()
                    .with_status(StatusPago::parse(&select.value())),
            );
        })
    };

    let on_moneda_filter = {
        let filters = filters.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            filters.set((*filters).clone().with_moneda(Moneda::parse(&select.value())));
        })
    };

    let on_sucursal_filter = {
        let filters = filters.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            filters.set(
                (*filters)
                    .clone()
                    .with_sucursal_id(select.value().parse().ok()),
            );
        })
    };

    let on_monto_min = {
        let filters = filters.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            filters.set(
                (*filters)
                    .clone()
                    .with_monto_min(input.value().trim().parse().ok()),
            );
        })
    };

    let on_monto_max = {
        let filters = filters.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            filters.set(
                (*filters)
                    .clone()
                    .with_monto_max(input.value().trim().parse().ok()),
            );
        })
    };

    let on_fecha_desde = {
        let filters = filters.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            filters.set((*filters).clone().with_fecha_desde(&input.value()));
        })
    };

    let on_fecha_hasta = {
        let filters = filters.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            filters.set((*filters).clone().with_fecha_hasta(&input.value()));
        })
    };

    let on_clear_filters = {
        let filters = filters.clone();
        Callback::from(move |_| filters.set(PagoFilters::default()))
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

        Callback::from(move |payload: PagoPayload| {
            let editing_id = editing.as_ref().map(|p| p.id);
            let show_form = show_form.clone();
            let saving = saving.clone();
            let notice = notice.clone();
            let refresh = refresh.clone();

            saving.set(true);
            spawn_local(async move {
                let result = match editing_id {
                    Some(id) => PagosApi::update(id, &payload).await,
                    None => PagosApi::create(&payload).await,
                };
                match result {
                    Ok(_) => {
                        notice.set(Some(Notice::success(if editing_id.is_some() {
                            "Pago actualizado correctamente"
                        } else {
                            "Pago creado correctamente"
                        })));
                        show_form.set(false);
                        refresh.set(*refresh + 1);
                    }
                    Err(err) => {
                        error!(format!("Error al guardar pago: {}", err));
                        notice.set(Some(Notice::error("No se pudo guardar el pago")));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_change_status = {
        let status_target = status_target.clone();
        let saving = saving.clone();
        let notice = notice.clone();
        let refresh = refresh.clone();
        Callback::from(move |(id, status): (i64, StatusPago)| {
            let status_target = status_target.clone();
            let saving = saving.clone();
            let notice = notice.clone();
            let refresh = refresh.clone();
            saving.set(true);
            spawn_local(async move {
                match PagosApi::change_status(id, status).await {
                    Ok(updated) => {
                        notice.set(Some(Notice::success(format!(
                            "El pago pasó a estado {}",
                            updated.status.label()
                        ))));
                        status_target.set(None);
                        refresh.set(*refresh + 1);
                    }
                    Err(err) => {
                        error!(format!("Error al cambiar estado del pago: {}", err));
                        notice.set(Some(Notice::error(
                            "No se pudo cambiar el estado del pago",
                        )));
                        // Re-fetch so the table reflects whatever the backend
                        // actually holds, not a local guess.
                        refresh.set(*refresh + 1);
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
                match PagosApi::delete(target.id).await {
                    Ok(()) => {
                        notice.set(Some(Notice::success("Pago eliminado correctamente")));
                        delete_target.set(None);
                        refresh.set(*refresh + 1);
                    }
                    Err(err) => {
                        error!(format!("Error al eliminar pago: {}", err));
                        notice.set(Some(Notice::error("No se pudo eliminar el pago")));
                    }
                }
                saving.set(false);
            });
        })
    };

    let status_value = filters.status.map(|s| s.as_str()).unwrap_or("");
    let moneda_value = filters.moneda.map(|m| m.as_str()).unwrap_or("");
    let sucursal_value = filters
        .sucursal_id
        .map(|id| id.to_string())
        .unwrap_or_default();

    html! {
        { page_shell(
            "Gestión de Pagos",
            "Solicitudes de pago y su ciclo de aprobación",
            html! {
                <button onclick={on_new} class="flex items-center gap-2 bg-[#173E63] text-white px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    { icon_plus() }
                    {"Nuevo Pago"}
                </button>
            },
            html! {
                <>
                    { notice_banner(&notice) }

                    <div class="bg-card rounded-[10px] p-4 border border-border grid grid-cols-2 md:grid-cols-5 gap-3">
                        <div class="space-y-1 col-span-2">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Buscar"}</label>
                            <div class="relative">
                                <span class="absolute left-3 top-2.5 text-slate-400">{ icon_search() }</span>
                                <input type="text" placeholder="Buscar por descripción..."
                                    value={filters.search.clone().unwrap_or_default()}
                                    oninput={on_search}
                                    class="w-full bg-[#f1f4f9] rounded-[10px] pl-8 pr-3 py-2 text-sm text-[#173E63] border-none" />
                            </div>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Estado"}</label>
                            <select onchange={on_status_filter}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none">
                                <option value="" selected={status_value.is_empty()}>{"Todos"}</option>
                                { for StatusPago::ALL.iter().map(|s| html! {
                                    <option value={s.as_str()} selected={status_value == s.as_str()}>{ s.label() }</option>
                                }) }
                            </select>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Moneda"}</label>
                            <select onchange={on_moneda_filter}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none">
                                <option value="" selected={moneda_value.is_empty()}>{"Todas"}</option>
                                { for Moneda::ALL.iter().map(|m| html! {
                                    <option value={m.as_str()} selected={moneda_value == m.as_str()}>{ m.as_str() }</option>
                                }) }
                            </select>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Sucursal"}</label>
                            <select onchange={on_sucursal_filter}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none">
                                <option value="" selected={sucursal_value.is_empty()}>{"Todas"}</option>
                                { for sucursales.iter().map(|s| {
                                    let value = s.id.to_string();
                                    let selected = sucursal_value == value;
                                    html! { <option value={value} selected={selected}>{ s.name.clone() }</option> }
                                }) }
                            </select>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Monto mínimo"}</label>
                            <input type="number" step="0.01" min="0" placeholder="0.00"
                                value={filters.monto_min.map(|v| v.to_string()).unwrap_or_default()}
                                oninput={on_monto_min}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none" />
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Monto máximo"}</label>
                            <input type="number" step="0.01" min="0" placeholder="0.00"
                                value={filters.monto_max.map(|v| v.to_string()).unwrap_or_default()}
                                oninput={on_monto_max}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none" />
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Fecha desde"}</label>
                            <input type="date" value={filters.fecha_desde.clone().unwrap_or_default()}
                                onchange={on_fecha_desde}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none" />
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Fecha hasta"}</label>
                            <input type="date" value={filters.fecha_hasta.clone().unwrap_or_default()}
                                onchange={on_fecha_hasta}
                                class="w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-sm text-[#173E63] border-none" />
                        </div>
                        <div class="flex items-end col-span-2 md:col-span-5 justify-end">
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
                                    format!("Mostrando {} de {} pagos", pagos.len(), *total)
                                }}
                            </span>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-6 py-3 font-bold">{"Descripción"}</th>
                                        <th class="px-6 py-3 font-bold">{"Monto"}</th>
                                        <th class="px-6 py-3 font-bold">{"Estado"}</th>
                                        <th class="px-6 py-3 font-bold">{"Cuenta Destino"}</th>
                                        <th class="px-6 py-3 font-bold">{"Adjuntos"}</th>
                                        <th class="px-6 py-3 font-bold">{"Fecha"}</th>
                                        <th class="px-6 py-3 font-bold">{"Acciones"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if *loading {
                                        html! { <tr><td colspan="7" class="px-6 py-6 text-center text-muted-foreground">{"Cargando..."}</td></tr> }
                                    } else if pagos.is_empty() {
                                        html! { <tr><td colspan="7" class="px-6 py-6 text-center text-muted-foreground">{"No se encontraron pagos"}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                                { for pagos.iter().map(|pago| {
                                                    let on_edit = {
                                                        let editing = editing.clone();
                                                        let show_form = show_form.clone();
                                                        let p = pago.clone();
                                                        Callback::from(move |_| {
                                                            editing.set(Some(p.clone()));
                                                            show_form.set(true);
                                                        })
                                                    };
                                                    let on_delete = {
                                                        let delete_target = delete_target.clone();
                                                        let p = pago.clone();
                                                        Callback::from(move |_| delete_target.set(Some(p.clone())))
                                                    };
                                                    let on_status = {
                                                        let status_target = status_target.clone();
                                                        let p = pago.clone();
                                                        Callback::from(move |_| status_target.set(Some(p.clone())))
                                                    };
                                                    let destino = pago
                                                        .cuenta_destino
                                                        .as_ref()
                                                        .map(|c| format!("{} - {}", c.nombre, c.numero));

                                                    html! {
                                                        <tr key={pago.id} class="text-sm hover:bg-muted/30 transition-colors">
                                                            <td class="px-6 py-3">
                                                                <p class="font-semibold text-foreground">{ &pago.descripcion }</p>
                                                                <p class="text-xs text-muted-foreground">{ sucursal_label(pago) }</p>
                                                            </td>
                                                            <td class="px-6 py-3 font-semibold text-foreground">
                                                                { format_money(pago.total, pago.moneda) }
                                                            </td>
                                                            <td class="px-6 py-3">
                                                                <span class={classes!("px-2.5", "py-1", "rounded-full", "text-[10px]", "font-bold", pago.status.badge_class())}>
                                                                    { pago.status.label() }
                                                                </span>
                                                            </td>
                                                            <td class="px-6 py-3 text-muted-foreground">
                                                                { destino.unwrap_or_else(|| "—".to_string()) }
                                                            </td>
                                                            <td class="px-6 py-3">
                                                                <div class="flex items-center gap-2 text-muted-foreground">
                                                                    { if let Some(v) = &pago.voucher_file {
                                                                        html! {
                                                                            <a href={crate::api::FilesApi::file_url(v.id)} target="_blank" rel="noopener"
                                                                                title="Ver voucher" class="text-[#173E63] hover:opacity-70">
                                                                                { icon_eye() }
                                                                            </a>
                                                                        }
                                                                    } else { html!{} } }
                                                                    { if !pago.document_files.is_empty() {
                                                                        html! {
                                                                            <span class="flex items-center gap-1 text-xs">
                                                                                { icon_file() }
                                                                                { pago.document_files.len() }
                                                                            </span>
                                                                        }
                                                                    } else { html!{} } }
                                                                </div>
                                                            </td>
                                                            <td class="px-6 py-3 text-muted-foreground">{ format_date(&pago.created_at) }</td>
                                                            <td class="px-6 py-3">
                                                                <div class="flex items-center gap-1">
                                                                    { if can_change {
                                                                        html! {
                                                                            <button title="Cambiar estado" disabled={*saving} onclick={on_status}
                                                                                class="p-1.5 rounded-lg text-blue-600 hover:bg-blue-50">
                                                                                { icon_status() }
                                                                            </button>
                                                                        }
                                                                    } else { html!{} } }
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
                                page={filters.page}
                                total_pages={*total_pages}
                                disabled={*loading}
                                on_change={on_page_change} />
                        </div>
                    </div>

                    {
                        if *show_form {
                            html! {
                                <PagoFormModal
                                    initial={(*editing).clone()}
                                    sucursales={(*sucursales).clone()}
                                    cuentas={(*cuentas).clone()}
                                    saving={*saving}
                                    on_submit={on_submit_form}
                                    on_cancel={on_cancel_form} />
                            }
                        } else {
                            html! {}
                        }
                    }

                    {
                        if let Some(target) = &*status_target {
                            let on_close = {
                                let status_target = status_target.clone();
                                Callback::from(move |_| status_target.set(None))
                            };
                            html! {
                                <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50 p-4">
                                    <div class="bg-white rounded-[16px] shadow-xl w-full max-w-md p-6">
                                        <h3 class="text-lg font-bold text-[#173E63] mb-2">{"Cambiar Estado"}</h3>
                                        <p class="text-sm text-slate-600 mb-4">
                                            { format!("\"{}\" está actualmente en estado {}.", target.descripcion, target.status.label()) }
                                        </p>
                                        <div class="flex flex-col gap-2">
                                            { for target.status.transition_targets().into_iter().map(|status| {
                                                let on_change_status = on_change_status.clone();
                                                let id = target.id;
                                                html! {
                                                    <button disabled={*saving}
                                                        onclick={Callback::from(move |_| on_change_status.emit((id, status)))}
                                                        class={classes!("px-4", "py-2", "text-sm", "rounded-[10px]", "font-bold", "text-left", status.badge_class())}>
                                                        { format!("Marcar como {}", status.label()) }
                                                    </button>
                                                }
                                            }) }
                                        </div>
                                        <div class="flex justify-end mt-6">
                                            <button onclick={on_close} disabled={*saving}
                                                class="px-4 py-2 text-sm rounded-[10px] text-slate-500 hover:bg-slate-100">
                                                {"Cancelar"}
                                            </button>
                                        </div>
                                    </div>
                                </div>
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
                                        <h3 class="text-lg font-bold text-[#173E63] mb-2">{"Eliminar Pago"}</h3>
                                        <p class="text-sm text-slate-600">
                                            { format!("¿Estás seguro de eliminar el pago \"{}\"? Esta acción no se puede deshacer.", target.descripcion) }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SucursalRef;

    fn pago(sucursal: Option<SucursalRef>) -> Pago {
        Pago {
            id: 1,
            descripcion: "Pago general".to_string(),
            justificacion: None,
            coordinado_con: None,
            total: 150.50,
            moneda: Moneda::PEN,
            status: StatusPago::Pendiente,
            sucursal_id: sucursal.as_ref().map(|s| s.id),
            sucursal,
            cuenta_destino_id: None,
            cuenta_destino: None,
            cuenta_propia_empresa_id: None,
            cuenta_propia_empresa: None,
            voucher_file: None,
            document_files: vec![],
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn branchless_payments_read_general() {
        assert_eq!(sucursal_label(&pago(None)), "General");
        assert_eq!(
            sucursal_label(&pago(Some(SucursalRef {
                id: 3,
                name: "Lima Centro".to_string(),
                code: None,
            }))),
            "Lima Centro"
        );
    }
}
